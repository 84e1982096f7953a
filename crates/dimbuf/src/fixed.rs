//! Stack-backed array owners with compile-time extents.
//!
//! A fixed array's rank and sizes are const generics, so the whole
//! buffer lives inline in the owner — no heap traffic at all. The cell
//! array sits inside a 128-byte-aligned wrapper: that satisfies every
//! supported block alignment (explicit alignments above 128 are
//! rejected at build time), and per-element alignment comes from the
//! policy's cell type. Construction default-constructs every element
//! and sets the bounds window to the full extent.
//!
//! Fixed arrays are `Clone` only when the policy cell is `Copy` — the
//! whole-extent bitwise copy of the original, expressed as a trait
//! bound instead of a documented hazard. Like resizable owners they are
//! meant to live as named stack values.

use dimbuf_alloc::{AlignPolicy, Cell, DefaultAlign};

use crate::bounds::BoundsWindow;
use crate::dim::{Dim, Dim1, Dim2, Dim3};
use crate::view::{View, ViewMut};

/// 128-byte-aligned inline storage wrapper.
///
/// 128 is the workspace's block-alignment ceiling for inline storage;
/// it covers the default policy and every explicit policy up to 128.
#[derive(Clone, Copy)]
#[repr(C, align(128))]
struct Inline128<R>(R);

/// Rank-1 fixed array of `X` elements.
pub struct FixedArray1<T, const X: usize, A: AlignPolicy = DefaultAlign> {
    cells: Inline128<[A::Cell<T>; X]>,
    bounds: BoundsWindow,
}

/// Rank-2 fixed array of `X * Y` elements, row-major.
pub struct FixedArray2<T, const X: usize, const Y: usize, A: AlignPolicy = DefaultAlign> {
    cells: Inline128<[[A::Cell<T>; Y]; X]>,
    bounds: BoundsWindow,
}

/// Rank-3 fixed array of `X * Y * Z` elements, row-major.
pub struct FixedArray3<
    T,
    const X: usize,
    const Y: usize,
    const Z: usize,
    A: AlignPolicy = DefaultAlign,
> {
    cells: Inline128<[[[A::Cell<T>; Z]; Y]; X]>,
    bounds: BoundsWindow,
}

impl<T: Default, const X: usize, A: AlignPolicy> FixedArray1<T, X, A> {
    const INLINE_ALIGN_OK: () = assert!(
        A::BLOCK_ALIGN <= 128,
        "inline arrays support block alignment up to 128 bytes"
    );

    /// Default-construct all `X` elements.
    pub fn new() -> Self {
        let () = Self::INLINE_ALIGN_OK;
        Self {
            cells: Inline128(std::array::from_fn(|_| {
                <A::Cell<T> as Cell>::new(T::default())
            })),
            bounds: BoundsWindow::full(X),
        }
    }
}

impl<T: Default, const X: usize, A: AlignPolicy> Default for FixedArray1<T, X, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const X: usize, A: AlignPolicy> Clone for FixedArray1<T, X, A>
where
    A::Cell<T>: Copy,
{
    fn clone(&self) -> Self {
        Self {
            cells: self.cells,
            bounds: self.bounds,
        }
    }
}

impl<T, const X: usize, A: AlignPolicy> FixedArray1<T, X, A> {
    /// Total element count.
    pub const fn len(&self) -> usize {
        X
    }

    /// Whether the array holds no elements.
    pub const fn is_empty(&self) -> bool {
        X == 0
    }

    /// Shared view of the whole buffer.
    pub fn view(&self) -> View<'_, A::Cell<T>, Dim1> {
        View::new(self.cells.0.as_ptr(), Dim1::from_extent(X), self.bounds)
    }

    /// Exclusive view of the whole buffer.
    pub fn view_mut(&mut self) -> ViewMut<'_, A::Cell<T>, Dim1> {
        ViewMut::new(self.cells.0.as_mut_ptr(), Dim1::from_extent(X), self.bounds)
    }

    /// Reference to element `x`.
    pub fn at(&self, x: isize) -> &T {
        self.view().at(x)
    }

    /// Mutable reference to element `x`.
    pub fn at_mut(&mut self, x: isize) -> &mut T {
        self.view_mut().into_at_mut(x)
    }
}

impl<T: Default, const X: usize, const Y: usize, A: AlignPolicy> FixedArray2<T, X, Y, A> {
    const INLINE_ALIGN_OK: () = assert!(
        A::BLOCK_ALIGN <= 128,
        "inline arrays support block alignment up to 128 bytes"
    );

    /// Default-construct all `X * Y` elements.
    pub fn new() -> Self {
        let () = Self::INLINE_ALIGN_OK;
        Self {
            cells: Inline128(std::array::from_fn(|_| {
                std::array::from_fn(|_| <A::Cell<T> as Cell>::new(T::default()))
            })),
            bounds: BoundsWindow::full(X * Y),
        }
    }
}

impl<T: Default, const X: usize, const Y: usize, A: AlignPolicy> Default
    for FixedArray2<T, X, Y, A>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const X: usize, const Y: usize, A: AlignPolicy> Clone for FixedArray2<T, X, Y, A>
where
    A::Cell<T>: Copy,
{
    fn clone(&self) -> Self {
        Self {
            cells: self.cells,
            bounds: self.bounds,
        }
    }
}

impl<T, const X: usize, const Y: usize, A: AlignPolicy> FixedArray2<T, X, Y, A> {
    /// Total element count.
    pub const fn len(&self) -> usize {
        X * Y
    }

    /// Whether the array holds no elements.
    pub const fn is_empty(&self) -> bool {
        X * Y == 0
    }

    /// Shared view of the whole buffer.
    ///
    /// Nested const-generic arrays are contiguous, so the flat pointer
    /// cast is layout-exact.
    pub fn view(&self) -> View<'_, A::Cell<T>, Dim2> {
        View::new(
            self.cells.0.as_ptr().cast::<A::Cell<T>>(),
            Dim2::from_extent((X, Y)),
            self.bounds,
        )
    }

    /// Exclusive view of the whole buffer.
    pub fn view_mut(&mut self) -> ViewMut<'_, A::Cell<T>, Dim2> {
        ViewMut::new(
            self.cells.0.as_mut_ptr().cast::<A::Cell<T>>(),
            Dim2::from_extent((X, Y)),
            self.bounds,
        )
    }

    /// Reference to the element at `(x, y)`.
    pub fn at(&self, x: isize, y: isize) -> &T {
        self.view().at(x, y)
    }

    /// Mutable reference to the element at `(x, y)`.
    pub fn at_mut(&mut self, x: isize, y: isize) -> &mut T {
        self.view_mut().into_at_mut(x, y)
    }

    /// Rank-1 view of row `x`.
    pub fn row(&self, x: isize) -> View<'_, A::Cell<T>, Dim1> {
        self.view().row(x)
    }

    /// Exclusive rank-1 view of row `x`.
    pub fn row_mut(&mut self, x: isize) -> ViewMut<'_, A::Cell<T>, Dim1> {
        self.view_mut().into_row_mut(x)
    }
}

impl<T: Default, const X: usize, const Y: usize, const Z: usize, A: AlignPolicy>
    FixedArray3<T, X, Y, Z, A>
{
    const INLINE_ALIGN_OK: () = assert!(
        A::BLOCK_ALIGN <= 128,
        "inline arrays support block alignment up to 128 bytes"
    );

    /// Default-construct all `X * Y * Z` elements.
    pub fn new() -> Self {
        let () = Self::INLINE_ALIGN_OK;
        Self {
            cells: Inline128(std::array::from_fn(|_| {
                std::array::from_fn(|_| {
                    std::array::from_fn(|_| <A::Cell<T> as Cell>::new(T::default()))
                })
            })),
            bounds: BoundsWindow::full(X * Y * Z),
        }
    }
}

impl<T: Default, const X: usize, const Y: usize, const Z: usize, A: AlignPolicy> Default
    for FixedArray3<T, X, Y, Z, A>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const X: usize, const Y: usize, const Z: usize, A: AlignPolicy> Clone
    for FixedArray3<T, X, Y, Z, A>
where
    A::Cell<T>: Copy,
{
    fn clone(&self) -> Self {
        Self {
            cells: self.cells,
            bounds: self.bounds,
        }
    }
}

impl<T, const X: usize, const Y: usize, const Z: usize, A: AlignPolicy> FixedArray3<T, X, Y, Z, A> {
    /// Total element count.
    pub const fn len(&self) -> usize {
        X * Y * Z
    }

    /// Whether the array holds no elements.
    pub const fn is_empty(&self) -> bool {
        X * Y * Z == 0
    }

    /// Shared view of the whole buffer.
    pub fn view(&self) -> View<'_, A::Cell<T>, Dim3> {
        View::new(
            self.cells.0.as_ptr().cast::<A::Cell<T>>(),
            Dim3::from_extent((X, Y, Z)),
            self.bounds,
        )
    }

    /// Exclusive view of the whole buffer.
    pub fn view_mut(&mut self) -> ViewMut<'_, A::Cell<T>, Dim3> {
        ViewMut::new(
            self.cells.0.as_mut_ptr().cast::<A::Cell<T>>(),
            Dim3::from_extent((X, Y, Z)),
            self.bounds,
        )
    }

    /// Reference to the element at `(x, y, z)`.
    pub fn at(&self, x: isize, y: isize, z: isize) -> &T {
        self.view().at(x, y, z)
    }

    /// Mutable reference to the element at `(x, y, z)`.
    pub fn at_mut(&mut self, x: isize, y: isize, z: isize) -> &mut T {
        self.view_mut().into_at_mut(x, y, z)
    }

    /// Rank-2 view of layer `x`.
    pub fn layer(&self, x: isize) -> View<'_, A::Cell<T>, Dim2> {
        self.view().layer(x)
    }

    /// Exclusive rank-2 view of layer `x`.
    pub fn layer_mut(&mut self, x: isize) -> ViewMut<'_, A::Cell<T>, Dim2> {
        self.view_mut().into_layer_mut(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimbuf_alloc::{BlockAligned, CacheLinePadded, CACHE_LINE};

    #[test]
    fn four_ints_scenario() {
        let mut a = FixedArray1::<i32, 4>::new();
        for i in 0..4 {
            *a.at_mut(i) = (i as i32 + 1) * 10;
        }
        assert_eq!(a.len(), 4);
        assert_eq!(a.view().as_slice(), &[10, 20, 30, 40]);
        // Data() escape hatch: third element without any gate.
        let data = a.view().data();
        // SAFETY: index 2 < 4 live cells.
        assert_eq!(unsafe { *(*data.add(2)).get() }, 30);

        let shifted = a.view() + 2;
        assert_eq!(*shifted.at(0), 30);
        #[cfg(feature = "bounds-checks")]
        {
            // Window [0, 3] shifted by -2: [-2, 1]. Shifted index -1 is
            // original index 1, still inside; one step past either end
            // of the original extent is out.
            assert_eq!(*shifted.at(-1), 20);
            assert!(!shifted.bounds().contains(-3));
            assert!(!shifted.bounds().contains(2));
        }
    }

    #[test]
    fn inline_storage_is_block_aligned() {
        let a = FixedArray1::<f32, 16>::new();
        assert_eq!(a.view().data() as usize % 128, 0);

        let b = FixedArray1::<f32, 16, BlockAligned<64>>::new();
        assert_eq!(b.view().data() as usize % 64, 0);
    }

    #[test]
    fn padded_fixed_array_spreads_elements() {
        let a = FixedArray1::<u8, 3, CacheLinePadded>::new();
        let base = a.view().data() as usize;
        assert_eq!(base % 128, 0);
        let first = a.at(0) as *const u8 as usize;
        let second = a.at(1) as *const u8 as usize;
        assert_eq!(second - first, CACHE_LINE);
    }

    #[test]
    fn clone_copies_the_whole_extent() {
        let mut a = FixedArray1::<i32, 4>::new();
        *a.at_mut(0) = 5;
        let mut b = a.clone();
        *b.at_mut(0) = 9;
        assert_eq!(*a.at(0), 5);
        assert_eq!(*b.at(0), 9);
    }

    #[test]
    fn rank2_fixed_matches_subview_indexing() {
        let mut a = FixedArray2::<i32, 3, 4>::new();
        for x in 0..3 {
            for y in 0..4 {
                *a.at_mut(x, y) = (x * 4 + y) as i32;
            }
        }
        assert_eq!(a.len(), 12);
        for x in 0..3 {
            for y in 0..4 {
                assert!(std::ptr::eq(a.at(x, y), a.row(x).at(y)));
            }
        }
    }

    #[test]
    fn rank3_fixed_full_chain() {
        let mut a = FixedArray3::<u16, 2, 2, 3>::new();
        *a.at_mut(1, 1, 2) = 77;
        assert_eq!(*a.layer(1).row(1).at(2), 77);
        assert_eq!(a.len(), 12);
        assert_eq!(a.layer(0).len(), 6);
    }

    #[test]
    fn default_constructs_elements() {
        let a = FixedArray2::<f64, 2, 2>::new();
        for x in 0..2 {
            for y in 0..2 {
                assert_eq!(*a.at(x, y), 0.0);
            }
        }
    }
}
