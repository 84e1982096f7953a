//! Aligned, fully-constructed heap blocks.
//!
//! A [`HeapBlock`] owns a contiguous allocation of `count` policy cells.
//! Creation allocates at the policy's block alignment and constructs
//! every cell in place; Drop destroys every cell in ascending index
//! order and releases the raw memory. Between those two points the
//! block is a plain region of live cells that views index into.

use std::alloc::{self, handle_alloc_error, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr;

use crate::align::AlignPolicy;
use crate::cell::Cell;

/// An aligned heap allocation of `count` constructed cells.
///
/// The block is the unit of ownership for resizable arrays: exactly one
/// owner holds it, and dropping the owner drops the block. Zero-count
/// blocks hold a null pointer and perform no allocation.
pub struct HeapBlock<T, A: AlignPolicy> {
    ptr: *mut A::Cell<T>,
    count: usize,
    _elem: PhantomData<T>,
}

impl<T, A: AlignPolicy> HeapBlock<T, A> {
    /// Allocate and default-construct `count` cells.
    ///
    /// The raw region is aligned to `A::BLOCK_ALIGN` (or the cell's own
    /// alignment, whichever is larger). Allocation failure is fatal; a
    /// `count` whose byte size overflows `usize` panics. Zero-sized
    /// cell types never touch the allocator: the block carries a
    /// dangling pointer and `count` live (zero-byte) cells.
    pub fn new(count: usize) -> Self
    where
        T: Default,
    {
        if count == 0 {
            return Self {
                ptr: ptr::null_mut(),
                count: 0,
                _elem: PhantomData,
            };
        }

        let layout = Self::layout(count);
        let ptr = if layout.size() == 0 {
            // Zero-sized cells occupy no memory; a dangling well-aligned
            // pointer stands in for the allocation. `alloc` requires a
            // non-zero-size layout.
            ptr::NonNull::<A::Cell<T>>::dangling().as_ptr()
        } else {
            // SAFETY: `layout` has non-zero size and a power-of-two
            // alignment from the policy.
            let raw = unsafe { alloc::alloc(layout) };
            if raw.is_null() {
                handle_alloc_error(layout);
            }
            raw.cast::<A::Cell<T>>()
        };
        for i in 0..count {
            // SAFETY: `i < count`, so `ptr.add(i)` is inside the fresh
            // allocation; `write` does not drop the uninitialised slot.
            unsafe { ptr.add(i).write(<A::Cell<T> as Cell>::new(T::default())) };
        }
        Self {
            ptr,
            count,
            _elem: PhantomData,
        }
    }

    /// Number of cells in the block.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the block holds no cells (and no allocation).
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pointer to the first cell. Null for empty blocks.
    pub fn as_ptr(&self) -> *const A::Cell<T> {
        self.ptr
    }

    /// Mutable pointer to the first cell. Null for empty blocks.
    pub fn as_mut_ptr(&mut self) -> *mut A::Cell<T> {
        self.ptr
    }

    /// The cells as a slice.
    pub fn cells(&self) -> &[A::Cell<T>] {
        if self.count == 0 {
            return &[];
        }
        // SAFETY: `ptr` points at `count` live cells owned by `self`.
        unsafe { std::slice::from_raw_parts(self.ptr, self.count) }
    }

    /// The cells as a mutable slice.
    pub fn cells_mut(&mut self) -> &mut [A::Cell<T>] {
        if self.count == 0 {
            return &mut [];
        }
        // SAFETY: `ptr` points at `count` live cells owned exclusively
        // by `self` (we hold `&mut self`).
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.count) }
    }

    fn layout(count: usize) -> Layout {
        let size = count
            .checked_mul(mem::size_of::<A::Cell<T>>())
            .expect("block byte size overflows usize");
        let align = A::BLOCK_ALIGN.max(mem::align_of::<A::Cell<T>>());
        Layout::from_size_align(size, align).expect("invalid block layout")
    }
}

impl<T, A: AlignPolicy> Drop for HeapBlock<T, A> {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        for i in 0..self.count {
            // SAFETY: each cell was constructed in `new` and is dropped
            // exactly once, in ascending index order.
            unsafe { ptr::drop_in_place(self.ptr.add(i)) };
        }
        let layout = Self::layout(self.count);
        if layout.size() != 0 {
            // SAFETY: `ptr` was allocated in `new` with this exact
            // layout; zero-size blocks were never allocated.
            unsafe { alloc::dealloc(self.ptr.cast(), layout) };
        }
    }
}

// SAFETY: the block owns its cells; sending or sharing it is exactly as
// safe as sending or sharing the cells themselves.
unsafe impl<T, A: AlignPolicy> Send for HeapBlock<T, A> where A::Cell<T>: Send {}
unsafe impl<T, A: AlignPolicy> Sync for HeapBlock<T, A> where A::Cell<T>: Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{BlockAligned, CacheLinePadded, DefaultAlign};
    use crate::cell::CACHE_LINE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_align_block_is_128_aligned() {
        let block = HeapBlock::<f32, DefaultAlign>::new(100);
        assert_eq!(block.as_ptr() as usize % 128, 0);
        assert_eq!(block.count(), 100);
    }

    #[test]
    fn explicit_alignment_is_honoured() {
        let block = HeapBlock::<u8, BlockAligned<4096>>::new(10);
        assert_eq!(block.as_ptr() as usize % 4096, 0);
    }

    #[test]
    fn cells_are_default_constructed() {
        let block = HeapBlock::<i32, DefaultAlign>::new(16);
        assert!(block.cells().iter().all(|c| *c.get() == 0));
    }

    #[test]
    fn padded_block_keeps_elements_a_line_apart() {
        let block = HeapBlock::<u32, CacheLinePadded>::new(4);
        let base = block.as_ptr() as usize;
        assert_eq!(base % 128, 0);
        let second = &block.cells()[1] as *const _ as usize;
        assert_eq!(second - base, CACHE_LINE);
    }

    #[test]
    fn zero_count_allocates_nothing() {
        let block = HeapBlock::<f64, DefaultAlign>::new(0);
        assert!(block.is_empty());
        assert!(block.as_ptr().is_null());
    }

    #[test]
    fn zero_sized_elements_never_touch_the_allocator() {
        // PlainCell<()> has size 0: the block must not hand a zero-size
        // layout to alloc/dealloc.
        let block = HeapBlock::<(), DefaultAlign>::new(3);
        assert_eq!(block.count(), 3);
        assert!(!block.as_ptr().is_null());
        assert_eq!(block.cells().len(), 3);
        drop(block);
    }

    #[test]
    fn writes_through_cells_persist() {
        let mut block = HeapBlock::<f32, DefaultAlign>::new(8);
        *block.cells_mut()[3].get_mut() = 2.5;
        assert_eq!(*block.cells()[3].get(), 2.5);
    }

    static LIVE: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Default for Counted {
        fn default() -> Self {
            LIVE.fetch_add(1, Ordering::SeqCst);
            Counted
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            LIVE.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn every_cell_is_constructed_and_dropped_once() {
        assert_eq!(LIVE.load(Ordering::SeqCst), 0);
        {
            let block = HeapBlock::<Counted, DefaultAlign>::new(37);
            assert_eq!(LIVE.load(Ordering::SeqCst), 37);
            drop(block);
        }
        assert_eq!(LIVE.load(Ordering::SeqCst), 0);
    }
}
