//! Rank metadata: size and stride fields per dimensionality.
//!
//! Rank is fixed at 1, 2 or 3 and chosen at compile time by picking one
//! of the closed set [`Dim1`], [`Dim2`], [`Dim3`]. Each carries exactly
//! the metadata its indexing arithmetic needs; everything is derivable
//! from the extent:
//!
//! - rank 2: `stride = y`, `len = x * y`
//! - rank 3: `stride_x = y * z`, `stride_y = z`, `len = x * y * z`
//!
//! Extent products use checked multiplication; overflow is a fatal
//! panic, consistent with the no-recoverable-allocation-error contract.

use std::fmt;

/// Rank-specific size/stride metadata for an array view.
///
/// The extent tuple ties constructor arity to rank at the type level:
/// constructing a rank-2 array with anything but an `(x, y)` pair is a
/// type error.
pub trait Dim: Copy + fmt::Debug {
    /// Extent shape matching the rank: `usize`, `(usize, usize)` or
    /// `(usize, usize, usize)`.
    type Extent: Copy + fmt::Debug;

    /// Derive metadata from an extent.
    fn from_extent(extent: Self::Extent) -> Self;

    /// Metadata for a zero-element array.
    fn zero() -> Self;

    /// Total element count: the product of the extents.
    fn len(&self) -> usize;

    /// Whether the array holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn product(a: usize, b: usize) -> usize {
    a.checked_mul(b).expect("array extent product overflows usize")
}

/// Rank-1 metadata: linear length only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dim1 {
    pub(crate) len: usize,
}

impl Dim for Dim1 {
    type Extent = usize;

    fn from_extent(x: usize) -> Self {
        Self { len: x }
    }

    fn zero() -> Self {
        Self { len: 0 }
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Rank-2 metadata: total length plus the row stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dim2 {
    pub(crate) len: usize,
    pub(crate) stride: usize,
}

impl Dim for Dim2 {
    type Extent = (usize, usize);

    fn from_extent((x, y): (usize, usize)) -> Self {
        Self {
            len: product(x, y),
            stride: y,
        }
    }

    fn zero() -> Self {
        Self { len: 0, stride: 0 }
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Dim2 {
    /// Elements to advance per step along the first index.
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Rank-3 metadata: total length plus two strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dim3 {
    pub(crate) len: usize,
    pub(crate) stride_x: usize,
    pub(crate) stride_y: usize,
}

impl Dim for Dim3 {
    type Extent = (usize, usize, usize);

    fn from_extent((x, y, z): (usize, usize, usize)) -> Self {
        let stride_x = product(y, z);
        Self {
            len: product(x, stride_x),
            stride_x,
            stride_y: z,
        }
    }

    fn zero() -> Self {
        Self {
            len: 0,
            stride_x: 0,
            stride_y: 0,
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Dim3 {
    /// Elements to advance per step along the first index.
    pub fn stride_x(&self) -> usize {
        self.stride_x
    }

    /// Elements to advance per step along the second index.
    pub fn stride_y(&self) -> usize {
        self.stride_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank1_len_is_extent() {
        assert_eq!(Dim1::from_extent(7).len(), 7);
        assert!(Dim1::from_extent(0).is_empty());
    }

    #[test]
    fn rank2_derives_stride_and_len() {
        let d = Dim2::from_extent((3, 4));
        assert_eq!(d.len(), 12);
        assert_eq!(d.stride(), 4);
    }

    #[test]
    fn rank3_derives_both_strides() {
        let d = Dim3::from_extent((2, 3, 5));
        assert_eq!(d.len(), 30);
        assert_eq!(d.stride_x(), 15);
        assert_eq!(d.stride_y(), 5);
    }

    #[test]
    fn zero_extent_collapses_len() {
        assert_eq!(Dim2::from_extent((3, 0)).len(), 0);
        assert_eq!(Dim3::from_extent((0, 4, 4)).len(), 0);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn extent_overflow_is_fatal() {
        let _ = Dim2::from_extent((usize::MAX, 2));
    }
}
