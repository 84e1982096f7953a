//! Non-owning array views: the handle type call sites pass around.
//!
//! A view is a raw cell pointer, rank metadata and a bounds window —
//! cheap to copy, nothing to drop. [`View`] is the shared flavour and is
//! `Copy`; [`ViewMut`] is the exclusive flavour and reborrows instead.
//! The lifetime parameter ties every view to the owner's buffer, so a
//! view cannot outlive the storage it indexes.
//!
//! Every indexed access — `at` on any rank, `first`, sub-view extraction
//! — gates its final linear offset through the view's [`BoundsWindow`]
//! before dereferencing. `as_slice` does not gate per index; it covers
//! the longest in-window prefix instead. The raw `data` pointer is the
//! only true escape hatch.
//!
//! # Offset views
//!
//! `view + d` shifts the visible index origin: index 0 of the result is
//! index `d` of the original, and the window shifts the opposite way so
//! it keeps describing the same physical region. Offset views may place
//! their base pointer outside the buffer; constructing one is fine (the
//! arithmetic is wrapping), but dereferencing an offset that the window
//! does not cover is the caller's responsibility when bounds checking is
//! compiled out.

use std::marker::PhantomData;
use std::mem;
use std::ops::{Add, Sub};

use dimbuf_alloc::{Cell, PlainCell};

use crate::bounds::BoundsWindow;
use crate::dim::{Dim, Dim1, Dim2, Dim3};

/// Shared view over a contiguous block of cells.
pub struct View<'a, C, D: Dim> {
    ptr: *const C,
    dim: D,
    bounds: BoundsWindow,
    _buf: PhantomData<&'a C>,
}

impl<C, D: Dim> Clone for View<'_, C, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, D: Dim> Copy for View<'_, C, D> {}

// SAFETY: a View hands out only shared references to cells, so sending
// or sharing it across threads is as safe as `&C`.
unsafe impl<C: Sync, D: Dim> Send for View<'_, C, D> {}
unsafe impl<C: Sync, D: Dim> Sync for View<'_, C, D> {}

impl<'a, C, D: Dim> View<'a, C, D> {
    pub(crate) fn new(ptr: *const C, dim: D, bounds: BoundsWindow) -> Self {
        Self {
            ptr,
            dim,
            bounds,
            _buf: PhantomData,
        }
    }

    /// An invalid view: null pointer, zero extent, empty window.
    pub fn empty() -> Self {
        Self::new(std::ptr::null(), D::zero(), BoundsWindow::empty())
    }

    /// Total element count: the product of the extents.
    pub fn len(&self) -> usize {
        self.dim.len()
    }

    /// Whether the view covers no elements.
    pub fn is_empty(&self) -> bool {
        self.dim.is_empty()
    }

    /// Whether the view points at a buffer at all.
    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }

    /// The rank metadata.
    pub fn dim(&self) -> D {
        self.dim
    }

    /// The bounds window, for inspection.
    pub fn bounds(&self) -> BoundsWindow {
        self.bounds
    }

    /// Raw cell pointer. Bypasses bounds checking entirely.
    pub fn data(&self) -> *const C {
        self.ptr
    }

    /// View of the same memory reinterpreted as `U` elements.
    ///
    /// Purely a type pun: no construction or destruction happens, the
    /// rank and stride metadata are carried over unchanged, and the
    /// bounds window is rescaled by the size ratio, then capped at the
    /// buffer's physical extent in `U` units so a wider `U` cannot
    /// widen the window past the allocation. The caller is responsible
    /// for layout compatibility.
    pub fn reinterpret<U>(&self) -> View<'a, PlainCell<U>, D> {
        let mut bounds = self.bounds;
        bounds.rescale(mem::size_of::<C>(), mem::size_of::<PlainCell<U>>());
        #[cfg(feature = "bounds-checks")]
        {
            let phys = self.dim.len() * mem::size_of::<C>() / mem::size_of::<PlainCell<U>>();
            bounds.limit_end(phys as isize - 1);
        }
        View::new(self.ptr.cast(), self.dim, bounds)
    }
}

impl<'a, C: Cell, D: Dim> View<'a, C, D> {
    /// The element at linear index 0, gated.
    pub fn first(&self) -> &'a C::Elem {
        let i = self.bounds.gate(0);
        // SAFETY: gated offsets lie inside the owner's live buffer for
        // any view derived from an owner (see module docs for offset
        // views with checking compiled out).
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }
}

impl<'a, C: Cell> View<'a, C, Dim1> {
    /// Reference to element `x` of the linear buffer.
    pub fn at(&self, x: isize) -> &'a C::Elem {
        let i = self.bounds.gate(x);
        // SAFETY: see `first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }
}

impl<'a, T> View<'a, PlainCell<T>, Dim1> {
    /// The longest in-window prefix of the extent, as a slice.
    ///
    /// On an unshifted view this is the whole buffer. A forward-shifted
    /// view yields only the tail from its origin to the window's end; a
    /// view shifted behind its buffer yields an empty slice. With
    /// bounds checking compiled out the slice always spans `len()`
    /// elements from the current origin, and shifted views are the
    /// caller's responsibility.
    ///
    /// Only plain (tight) cells are slice-compatible; `PlainCell<T>` is
    /// `repr(transparent)` over `T`.
    pub fn as_slice(&self) -> &'a [T] {
        if !self.is_valid() {
            return &[];
        }
        let len = self.bounds.prefix_len(self.dim.len);
        // SAFETY: every offset in `[0, len)` is inside the window, so
        // the cells are live; PlainCell<T> is layout-identical to T.
        unsafe { std::slice::from_raw_parts(self.ptr.cast::<T>(), len) }
    }
}

impl<'a, C: Cell> View<'a, C, Dim2> {
    /// Reference to the element at `(x, y)`: linear offset
    /// `x * stride + y`, gated.
    pub fn at(&self, x: isize, y: isize) -> &'a C::Elem {
        let i = self.bounds.gate(x * self.dim.stride as isize + y);
        // SAFETY: see `first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }

    /// Rank-1 sub-view of row `x`: array-of-arrays semantics.
    ///
    /// The child's base is shifted to `x * stride` and its window is
    /// the parent's shifted by the same amount, so child index 0 lines
    /// up with parent index `x * stride`. An out-of-window row yields
    /// an invalid (empty) view under fail-soft checking.
    pub fn row(&self, x: isize) -> View<'a, C, Dim1> {
        let off = x * self.dim.stride as isize;
        if !self.bounds.contains(off) {
            debug_assert!(false, "row {x} outside bounds window");
            return View::empty();
        }
        let mut bounds = self.bounds;
        bounds.shift(-off);
        View::new(
            self.ptr.wrapping_offset(off),
            Dim1 {
                len: self.dim.stride,
            },
            bounds,
        )
    }
}

impl<'a, C: Cell> View<'a, C, Dim3> {
    /// Reference to the element at `(x, y, z)`: linear offset
    /// `x * stride_x + y * stride_y + z`, gated.
    pub fn at(&self, x: isize, y: isize, z: isize) -> &'a C::Elem {
        let linear = x * self.dim.stride_x as isize + y * self.dim.stride_y as isize + z;
        let i = self.bounds.gate(linear);
        // SAFETY: see `first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }

    /// Rank-2 sub-view of layer `x`: array-of-arrays semantics.
    pub fn layer(&self, x: isize) -> View<'a, C, Dim2> {
        let off = x * self.dim.stride_x as isize;
        if !self.bounds.contains(off) {
            debug_assert!(false, "layer {x} outside bounds window");
            return View::empty();
        }
        let mut bounds = self.bounds;
        bounds.shift(-off);
        View::new(
            self.ptr.wrapping_offset(off),
            Dim2 {
                len: self.dim.stride_x,
                stride: self.dim.stride_y,
            },
            bounds,
        )
    }
}

impl<C, D: Dim> Add<isize> for View<'_, C, D> {
    type Output = Self;

    /// Shift the visible origin forward: index 0 of the result is index
    /// `x` of `self`.
    fn add(mut self, x: isize) -> Self {
        self.ptr = self.ptr.wrapping_offset(x);
        self.bounds.shift(-x);
        self
    }
}

impl<C, D: Dim> Sub<isize> for View<'_, C, D> {
    type Output = Self;

    /// Shift the visible origin backward: index `x` of the result is
    /// index 0 of `self`.
    fn sub(mut self, x: isize) -> Self {
        self.ptr = self.ptr.wrapping_offset(-x);
        self.bounds.shift(x);
        self
    }
}

/// Exclusive view over a contiguous block of cells.
///
/// Not `Copy`: exclusive access is preserved by reborrowing
/// ([`ViewMut::reborrow`]) the way `&mut` itself does.
pub struct ViewMut<'a, C, D: Dim> {
    ptr: *mut C,
    dim: D,
    bounds: BoundsWindow,
    _buf: PhantomData<&'a mut C>,
}

// SAFETY: a ViewMut is semantically `&mut [C]` plus metadata.
unsafe impl<C: Send, D: Dim> Send for ViewMut<'_, C, D> {}
unsafe impl<C: Sync, D: Dim> Sync for ViewMut<'_, C, D> {}

impl<'a, C, D: Dim> ViewMut<'a, C, D> {
    pub(crate) fn new(ptr: *mut C, dim: D, bounds: BoundsWindow) -> Self {
        Self {
            ptr,
            dim,
            bounds,
            _buf: PhantomData,
        }
    }

    /// An invalid view: null pointer, zero extent, empty window.
    pub fn empty() -> Self {
        Self::new(std::ptr::null_mut(), D::zero(), BoundsWindow::empty())
    }

    /// Total element count: the product of the extents.
    pub fn len(&self) -> usize {
        self.dim.len()
    }

    /// Whether the view covers no elements.
    pub fn is_empty(&self) -> bool {
        self.dim.is_empty()
    }

    /// Whether the view points at a buffer at all.
    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }

    /// The rank metadata.
    pub fn dim(&self) -> D {
        self.dim
    }

    /// The bounds window, for inspection.
    pub fn bounds(&self) -> BoundsWindow {
        self.bounds
    }

    /// Raw cell pointer. Bypasses bounds checking entirely.
    pub fn data(&self) -> *const C {
        self.ptr
    }

    /// Raw mutable cell pointer. Bypasses bounds checking entirely.
    pub fn data_mut(&mut self) -> *mut C {
        self.ptr
    }

    /// Shared view of the same region, borrowing from `self`.
    pub fn as_view(&self) -> View<'_, C, D> {
        View::new(self.ptr, self.dim, self.bounds)
    }

    /// Exclusive reborrow, ending when the returned view is dropped.
    pub fn reborrow(&mut self) -> ViewMut<'_, C, D> {
        ViewMut::new(self.ptr, self.dim, self.bounds)
    }

    /// The same memory reinterpreted as `U` elements, exclusively.
    ///
    /// Consumes `self` so the punned view is the only live path to the
    /// region. See [`View::reinterpret`] for the contract.
    pub fn reinterpret<U>(self) -> ViewMut<'a, PlainCell<U>, D> {
        let mut bounds = self.bounds;
        bounds.rescale(mem::size_of::<C>(), mem::size_of::<PlainCell<U>>());
        #[cfg(feature = "bounds-checks")]
        {
            let phys = self.dim.len() * mem::size_of::<C>() / mem::size_of::<PlainCell<U>>();
            bounds.limit_end(phys as isize - 1);
        }
        ViewMut::new(self.ptr.cast(), self.dim, bounds)
    }
}

impl<C: Cell, D: Dim> ViewMut<'_, C, D> {
    /// The element at linear index 0, gated.
    pub fn first(&self) -> &C::Elem {
        let i = self.bounds.gate(0);
        // SAFETY: see `View::first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }

    /// Mutable access to the element at linear index 0, gated.
    pub fn first_mut(&mut self) -> &mut C::Elem {
        let i = self.bounds.gate(0);
        // SAFETY: see `View::first`; exclusivity comes from `&mut self`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }
}

impl<'a, C: Cell, D: Dim> ViewMut<'a, C, D> {
    /// Like [`ViewMut::first_mut`], consuming the view so the reference
    /// lives as long as the underlying borrow.
    pub fn into_first_mut(self) -> &'a mut C::Elem {
        let i = self.bounds.gate(0);
        // SAFETY: see `View::first`; `self` is consumed, so this is the
        // only live path to the region for `'a`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }
}

impl<C: Cell> ViewMut<'_, C, Dim1> {
    /// Reference to element `x` of the linear buffer.
    pub fn at(&self, x: isize) -> &C::Elem {
        let i = self.bounds.gate(x);
        // SAFETY: see `View::first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }

    /// Mutable reference to element `x` of the linear buffer.
    pub fn at_mut(&mut self, x: isize) -> &mut C::Elem {
        let i = self.bounds.gate(x);
        // SAFETY: see `View::first`; exclusivity comes from `&mut self`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }
}

impl<'a, C: Cell> ViewMut<'a, C, Dim1> {
    /// Like [`ViewMut::at_mut`], consuming the view so the reference
    /// lives as long as the underlying borrow.
    pub fn into_at_mut(self, x: isize) -> &'a mut C::Elem {
        let i = self.bounds.gate(x);
        // SAFETY: see `into_first_mut`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }
}

impl<T> ViewMut<'_, PlainCell<T>, Dim1> {
    /// The longest in-window prefix of the extent, as a mutable slice.
    ///
    /// See [`View::as_slice`] for the shifted-view contract.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if !self.is_valid() {
            return &mut [];
        }
        let len = self.bounds.prefix_len(self.dim.len);
        // SAFETY: see `View::as_slice`; exclusivity from `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.cast::<T>(), len) }
    }
}

impl<C: Cell> ViewMut<'_, C, Dim2> {
    /// Reference to the element at `(x, y)`, gated.
    pub fn at(&self, x: isize, y: isize) -> &C::Elem {
        let i = self.bounds.gate(x * self.dim.stride as isize + y);
        // SAFETY: see `View::first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }

    /// Mutable reference to the element at `(x, y)`, gated.
    pub fn at_mut(&mut self, x: isize, y: isize) -> &mut C::Elem {
        let i = self.bounds.gate(x * self.dim.stride as isize + y);
        // SAFETY: see `View::first`; exclusivity comes from `&mut self`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }

    /// Shared rank-1 sub-view of row `x`.
    pub fn row(&self, x: isize) -> View<'_, C, Dim1> {
        self.as_view().row(x)
    }

    /// Exclusive rank-1 sub-view of row `x`.
    pub fn row_mut(&mut self, x: isize) -> ViewMut<'_, C, Dim1> {
        self.reborrow().into_row_mut(x)
    }
}

impl<'a, C: Cell> ViewMut<'a, C, Dim2> {
    /// Like `at_mut`, consuming the view so the reference lives as long
    /// as the underlying borrow.
    pub fn into_at_mut(self, x: isize, y: isize) -> &'a mut C::Elem {
        let i = self.bounds.gate(x * self.dim.stride as isize + y);
        // SAFETY: see `into_first_mut`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }

    /// Like [`ViewMut::row_mut`], consuming the view.
    pub fn into_row_mut(self, x: isize) -> ViewMut<'a, C, Dim1> {
        let off = x * self.dim.stride as isize;
        if !self.bounds.contains(off) {
            debug_assert!(false, "row {x} outside bounds window");
            return ViewMut::empty();
        }
        let mut bounds = self.bounds;
        bounds.shift(-off);
        ViewMut::new(
            self.ptr.wrapping_offset(off),
            Dim1 {
                len: self.dim.stride,
            },
            bounds,
        )
    }
}

impl<C: Cell> ViewMut<'_, C, Dim3> {
    /// Reference to the element at `(x, y, z)`, gated.
    pub fn at(&self, x: isize, y: isize, z: isize) -> &C::Elem {
        let linear = x * self.dim.stride_x as isize + y * self.dim.stride_y as isize + z;
        let i = self.bounds.gate(linear);
        // SAFETY: see `View::first`.
        unsafe { (&*self.ptr.wrapping_offset(i)).get() }
    }

    /// Mutable reference to the element at `(x, y, z)`, gated.
    pub fn at_mut(&mut self, x: isize, y: isize, z: isize) -> &mut C::Elem {
        let linear = x * self.dim.stride_x as isize + y * self.dim.stride_y as isize + z;
        let i = self.bounds.gate(linear);
        // SAFETY: see `View::first`; exclusivity comes from `&mut self`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }

    /// Shared rank-2 sub-view of layer `x`.
    pub fn layer(&self, x: isize) -> View<'_, C, Dim2> {
        self.as_view().layer(x)
    }

    /// Exclusive rank-2 sub-view of layer `x`.
    pub fn layer_mut(&mut self, x: isize) -> ViewMut<'_, C, Dim2> {
        self.reborrow().into_layer_mut(x)
    }
}

impl<'a, C: Cell> ViewMut<'a, C, Dim3> {
    /// Like `at_mut`, consuming the view so the reference lives as long
    /// as the underlying borrow.
    pub fn into_at_mut(self, x: isize, y: isize, z: isize) -> &'a mut C::Elem {
        let linear = x * self.dim.stride_x as isize + y * self.dim.stride_y as isize + z;
        let i = self.bounds.gate(linear);
        // SAFETY: see `into_first_mut`.
        unsafe { (&mut *self.ptr.wrapping_offset(i)).get_mut() }
    }

    /// Like [`ViewMut::layer_mut`], consuming the view.
    pub fn into_layer_mut(self, x: isize) -> ViewMut<'a, C, Dim2> {
        let off = x * self.dim.stride_x as isize;
        if !self.bounds.contains(off) {
            debug_assert!(false, "layer {x} outside bounds window");
            return ViewMut::empty();
        }
        let mut bounds = self.bounds;
        bounds.shift(-off);
        ViewMut::new(
            self.ptr.wrapping_offset(off),
            Dim2 {
                len: self.dim.stride_x,
                stride: self.dim.stride_y,
            },
            bounds,
        )
    }
}

impl<C, D: Dim> Add<isize> for ViewMut<'_, C, D> {
    type Output = Self;

    /// Shift the visible origin forward: index 0 of the result is index
    /// `x` of `self`.
    fn add(mut self, x: isize) -> Self {
        self.ptr = self.ptr.wrapping_offset(x);
        self.bounds.shift(-x);
        self
    }
}

impl<C, D: Dim> Sub<isize> for ViewMut<'_, C, D> {
    type Output = Self;

    /// Shift the visible origin backward: index `x` of the result is
    /// index 0 of `self`.
    fn sub(mut self, x: isize) -> Self {
        self.ptr = self.ptr.wrapping_offset(-x);
        self.bounds.shift(x);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::Dim;

    fn cells(values: &[i32]) -> Vec<PlainCell<i32>> {
        values.iter().map(|&v| PlainCell::new(v)).collect()
    }

    fn view_of(buf: &[PlainCell<i32>]) -> View<'_, PlainCell<i32>, Dim1> {
        View::new(
            buf.as_ptr(),
            Dim1::from_extent(buf.len()),
            BoundsWindow::full(buf.len()),
        )
    }

    #[test]
    fn linear_reads() {
        let buf = cells(&[10, 20, 30, 40]);
        let v = view_of(&buf);
        assert_eq!(*v.at(0), 10);
        assert_eq!(*v.at(3), 40);
        assert_eq!(*v.first(), 10);
        assert_eq!(v.len(), 4);
        assert!(v.is_valid());
    }

    #[test]
    fn offset_shifts_origin_and_window() {
        let buf = cells(&[10, 20, 30, 40]);
        let shifted = view_of(&buf) + 2;
        assert_eq!(*shifted.at(0), 30);
        assert_eq!(*shifted.at(1), 40);
        #[cfg(feature = "bounds-checks")]
        {
            assert_eq!(shifted.bounds().start(), -2);
            assert_eq!(shifted.bounds().end(), 1);
            assert!(!shifted.bounds().contains(2));
        }
    }

    #[test]
    fn offset_is_an_involution() {
        let buf = cells(&[1, 2, 3, 4, 5]);
        let v = view_of(&buf);
        let back = (v + 3) - 3;
        assert_eq!(back.data(), v.data());
        assert_eq!(back.bounds(), v.bounds());
    }

    #[test]
    fn negative_indexing_into_shifted_views() {
        let buf = cells(&[10, 20, 30, 40]);
        let shifted = view_of(&buf) + 2;
        assert_eq!(*shifted.at(-1), 20);
    }

    #[cfg(feature = "bounds-checks")]
    #[test]
    fn shifted_view_slices_stop_at_the_window() {
        let buf = cells(&[10, 20, 30, 40]);

        // Forward shift: only the remaining tail is sliceable.
        let tail = (view_of(&buf) + 2).as_slice();
        assert_eq!(tail, &[30, 40]);

        // Backward shift: offset 0 now points before the buffer.
        let behind = (view_of(&buf) - 1).as_slice();
        assert!(behind.is_empty());
    }

    #[cfg(feature = "bounds-checks")]
    #[test]
    fn shifted_mut_slice_stops_at_the_window() {
        let mut buf = cells(&[1, 2, 3, 4]);
        let len = buf.len();
        let v: ViewMut<'_, PlainCell<i32>, Dim1> = ViewMut::new(
            buf.as_mut_ptr(),
            Dim1::from_extent(len),
            BoundsWindow::full(len),
        );
        let mut shifted = v + 3;
        assert_eq!(shifted.as_mut_slice(), &mut [4]);
    }

    #[cfg(feature = "bounds-checks")]
    #[test]
    fn reinterpret_to_wider_elements_caps_the_window() {
        // 4 x i32 = 16 bytes = 2 physical u64 slots.
        let buf = cells(&[1, 2, 3, 4]);
        let wide = view_of(&buf).reinterpret::<u64>();
        assert_eq!(wide.bounds().end(), 1);
        assert!(!wide.bounds().contains(2));
    }

    #[test]
    fn empty_view_is_invalid() {
        let v: View<'_, PlainCell<i32>, Dim1> = View::empty();
        assert!(!v.is_valid());
        assert!(v.is_empty());
        assert_eq!(v.as_slice(), &[] as &[i32]);
    }

    #[test]
    fn reinterpret_preserves_pointer_and_rescales_window() {
        let buf = cells(&[0x0a0b0c0d, 0x01020304]);
        let v = view_of(&buf);
        let bytes = v.reinterpret::<u8>();
        assert_eq!(bytes.data() as usize, v.data() as usize);
        #[cfg(feature = "bounds-checks")]
        {
            // [0, 1] at 4 bytes -> [0*1/4, 1*1/4] = [0, 0].
            assert_eq!(bytes.bounds().start(), 0);
            assert_eq!(bytes.bounds().end(), 0);
        }
        assert_eq!(*bytes.at(0), buf[0].get().to_ne_bytes()[0]);
    }

    #[test]
    fn mut_view_writes_land() {
        let mut buf = cells(&[0, 0, 0]);
        let len = buf.len();
        let mut v: ViewMut<'_, PlainCell<i32>, Dim1> = ViewMut::new(
            buf.as_mut_ptr(),
            Dim1::from_extent(len),
            BoundsWindow::full(len),
        );
        *v.at_mut(1) = 99;
        *v.first_mut() = 7;
        assert_eq!(v.as_mut_slice(), &mut [7, 99, 0]);
    }

    #[test]
    fn rank2_rows_match_direct_indexing() {
        // 2 x 3 row-major buffer.
        let buf = cells(&[1, 2, 3, 4, 5, 6]);
        let v: View<'_, PlainCell<i32>, Dim2> = View::new(
            buf.as_ptr(),
            Dim2::from_extent((2, 3)),
            BoundsWindow::full(6),
        );
        for x in 0..2 {
            for y in 0..3 {
                assert!(std::ptr::eq(v.at(x, y), v.row(x).at(y)));
            }
        }
        assert_eq!(v.row(1).len(), 3);
    }

    #[test]
    fn rank3_layers_match_direct_indexing() {
        let values: Vec<i32> = (0..24).collect();
        let buf = cells(&values);
        let v: View<'_, PlainCell<i32>, Dim3> = View::new(
            buf.as_ptr(),
            Dim3::from_extent((2, 3, 4)),
            BoundsWindow::full(24),
        );
        for x in 0..2 {
            for y in 0..3 {
                for z in 0..4 {
                    assert_eq!(*v.at(x, y, z), (x * 12 + y * 4 + z) as i32);
                    assert!(std::ptr::eq(v.at(x, y, z), v.layer(x).row(y).at(z)));
                }
            }
        }
        assert_eq!(v.layer(1).len(), 12);
        assert_eq!(v.layer(1).dim().stride(), 4);
    }
}
