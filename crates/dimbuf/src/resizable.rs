//! Heap-backed array owners with run-time extents.
//!
//! A [`ResizableArray`] owns an aligned [`HeapBlock`] whose extent is
//! chosen at run time — the variable-length-array-on-the-stack pattern:
//! declare the owner as a named local, size it from run-time data, and
//! let Drop free the block at scope exit. Owners are deliberately not
//! `Clone` (a heap buffer has exactly one owner) and are meant to live
//! as stack values; Rust cannot forbid boxing an owner, so heap
//! placement is discouraged by convention rather than mechanism.
//!
//! Resizing always discards prior contents: the old block is freed
//! first, then a fresh default-constructed block is allocated. Callers
//! wanting content-preserving growth should use `Vec` instead.

use dimbuf_alloc::{AlignPolicy, DefaultAlign, HeapBlock};

use crate::bounds::BoundsWindow;
use crate::dim::{Dim, Dim1, Dim2, Dim3};
use crate::view::{View, ViewMut};

/// Heap-backed owner of a rank-`D` array buffer.
///
/// The extent argument of [`ResizableArray::new`] and
/// [`ResizableArray::resize`] is the rank's tuple type, so calling a
/// rank-2 owner with three sizes is a type error, not a run-time one.
pub struct ResizableArray<T, D: Dim, A: AlignPolicy = DefaultAlign> {
    block: Option<HeapBlock<T, A>>,
    dim: D,
    bounds: BoundsWindow,
}

/// Rank-1 resizable array.
pub type Resizable1<T, A = DefaultAlign> = ResizableArray<T, Dim1, A>;
/// Rank-2 resizable array.
pub type Resizable2<T, A = DefaultAlign> = ResizableArray<T, Dim2, A>;
/// Rank-3 resizable array.
pub type Resizable3<T, A = DefaultAlign> = ResizableArray<T, Dim3, A>;

impl<T, D: Dim, A: AlignPolicy> ResizableArray<T, D, A> {
    /// An owner with no buffer. `resize` gives it one.
    pub fn empty() -> Self {
        Self {
            block: None,
            dim: D::zero(),
            bounds: BoundsWindow::empty(),
        }
    }

    /// Total element count: the product of the extents.
    pub fn len(&self) -> usize {
        self.dim.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.dim.is_empty()
    }

    /// Whether a buffer is currently allocated.
    pub fn is_valid(&self) -> bool {
        self.block.is_some()
    }

    /// Shared view of the whole buffer.
    pub fn view(&self) -> View<'_, A::Cell<T>, D> {
        match &self.block {
            Some(block) => View::new(block.as_ptr(), self.dim, self.bounds),
            None => View::empty(),
        }
    }

    /// Exclusive view of the whole buffer.
    pub fn view_mut(&mut self) -> ViewMut<'_, A::Cell<T>, D> {
        match &mut self.block {
            Some(block) => ViewMut::new(block.as_mut_ptr(), self.dim, self.bounds),
            None => ViewMut::empty(),
        }
    }
}

impl<T: Default, D: Dim, A: AlignPolicy> ResizableArray<T, D, A> {
    /// Allocate a buffer of the given extent, default-constructing
    /// every element. A zero extent allocates nothing.
    pub fn new(extent: D::Extent) -> Self {
        let mut array = Self::empty();
        array.resize(extent);
        array
    }

    /// Free the current buffer and allocate a fresh one of the new
    /// extent. Prior contents are always discarded; a zero extent
    /// leaves the owner without a buffer.
    pub fn resize(&mut self, extent: D::Extent) {
        // Free before allocating: peak memory stays at max(old, new)
        // rather than old + new.
        self.block = None;
        let dim = D::from_extent(extent);
        self.dim = dim;
        if dim.is_empty() {
            self.bounds = BoundsWindow::empty();
        } else {
            self.block = Some(HeapBlock::new(dim.len()));
            self.bounds = BoundsWindow::full(dim.len());
        }
    }
}

impl<T, D: Dim, A: AlignPolicy> Default for ResizableArray<T, D, A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, A: AlignPolicy> Resizable1<T, A> {
    /// Reference to element `x`.
    pub fn at(&self, x: isize) -> &T {
        self.view().at(x)
    }

    /// Mutable reference to element `x`.
    pub fn at_mut(&mut self, x: isize) -> &mut T {
        self.view_mut().into_at_mut(x)
    }
}

impl<T, A: AlignPolicy> Resizable2<T, A> {
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

impl<T, A: AlignPolicy> Resizable3<T, A> {
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
    use dimbuf_alloc::{CacheLinePadded, Cell, PaddedCell, CACHE_LINE};

    #[test]
    fn size_is_the_product_of_extents() {
        assert_eq!(Resizable1::<f32>::new(7).len(), 7);
        assert_eq!(Resizable2::<f32>::new((3, 4)).len(), 12);
        assert_eq!(Resizable3::<f32>::new((2, 3, 4)).len(), 24);
    }

    #[test]
    fn empty_owner_has_no_buffer() {
        let a = Resizable1::<i32>::empty();
        assert!(!a.is_valid());
        assert!(a.is_empty());
        assert!(!a.view().is_valid());
    }

    #[test]
    fn elements_are_default_constructed() {
        let a = Resizable1::<i32>::new(5);
        for i in 0..5 {
            assert_eq!(*a.at(i), 0);
        }
    }

    #[test]
    fn writes_read_back() {
        let mut a = Resizable1::<i32>::new(4);
        for i in 0..4 {
            *a.at_mut(i) = (i as i32 + 1) * 10;
        }
        assert_eq!(*a.at(2), 30);
        assert_eq!(a.view().as_slice(), &[10, 20, 30, 40]);
    }

    #[test]
    fn resize_discards_and_reconstructs() {
        let mut a = Resizable1::<i32>::new(3);
        *a.at_mut(0) = 42;
        a.resize(6);
        assert_eq!(a.len(), 6);
        // Fresh buffer: contents are default, not preserved.
        for i in 0..6 {
            assert_eq!(*a.at(i), 0);
        }
        for i in 0..6 {
            *a.at_mut(i) = i as i32;
        }
        assert_eq!(*a.at(5), 5);
    }

    #[test]
    fn resize_to_zero_drops_the_buffer() {
        let mut a = Resizable1::<f64>::new(8);
        a.resize(0);
        assert!(!a.is_valid());
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn rank2_multi_index_matches_subview() {
        let mut a = Resizable2::<i32>::new((3, 4));
        for x in 0..3 {
            for y in 0..4 {
                *a.at_mut(x, y) = (x * 4 + y) as i32;
            }
        }
        for x in 0..3 {
            for y in 0..4 {
                assert!(std::ptr::eq(a.at(x, y), a.row(x).at(y)));
            }
        }
        assert_eq!(*a.row(1).at(2), 6);
    }

    #[test]
    fn rank3_layers_chain_down_to_elements() {
        let mut a = Resizable3::<i32>::new((2, 3, 4));
        for x in 0..2 {
            for y in 0..3 {
                for z in 0..4 {
                    *a.at_mut(x, y, z) = (x * 12 + y * 4 + z) as i32;
                }
            }
        }
        assert!(std::ptr::eq(a.at(1, 2, 3), a.layer(1).row(2).at(3)));
        assert_eq!(*a.layer(1).at(2, 3), 23);
    }

    #[test]
    fn mutation_through_row_views() {
        let mut a = Resizable2::<i32>::new((2, 3));
        *a.row_mut(1).at_mut(2) = 7;
        assert_eq!(*a.at(1, 2), 7);
    }

    #[test]
    fn cache_line_padded_elements_are_spread_out() {
        let mut a = Resizable1::<u32, CacheLinePadded>::new(4);
        for i in 0..4 {
            *a.at_mut(i) = i as u32;
        }
        let v = a.view();
        let first = v.at(0) as *const u32 as usize;
        let second = v.at(1) as *const u32 as usize;
        assert_eq!(second - first, CACHE_LINE);
        assert_eq!(*v.at(3), 3);
    }

    #[test]
    fn padded_view_data_is_cell_granular() {
        let a = Resizable1::<u8, CacheLinePadded>::new(2);
        let cells: *const PaddedCell<u8> = a.view().data();
        // SAFETY: two live cells were just allocated.
        let gap = unsafe { cells.add(1) as usize - cells as usize };
        assert_eq!(gap, std::mem::size_of::<PaddedCell<u8>>());
        assert_eq!(unsafe { *(*cells).get() }, 0);
    }

    #[test]
    fn zero_sized_elements_are_indexable() {
        let mut a = Resizable1::<()>::new(3);
        assert!(a.is_valid());
        assert_eq!(a.len(), 3);
        *a.at_mut(1) = ();
        let _: &() = a.at(2);
        a.resize(5);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn owners_are_send_when_elements_are() {
        fn assert_send<T: Send>() {}
        assert_send::<Resizable1<f32>>();
        assert_send::<Resizable3<u64, CacheLinePadded>>();
    }
}
