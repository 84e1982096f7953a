//! Dimension-aware, bounds-checkable arrays for numerical kernels.
//!
//! A drop-in replacement for raw fixed- and variable-length arrays:
//! variable-length arrays sized at run time that behave like stack
//! declarations, fixed arrays sized at compile time that live entirely
//! on the stack, and cheap non-owning views for passing either kind
//! into functions — with optional, compile-time-toggled bounds checking
//! and per-array alignment control.
//!
//! # Architecture
//!
//! ```text
//! dimbuf-alloc            cells, alignment policies, heap blocks
//! └── dimbuf
//!     ├── bounds          BoundsWindow (feature-toggled)
//!     ├── dim             Dim1 / Dim2 / Dim3 size+stride metadata
//!     ├── view            View / ViewMut handles, sub-views, offsets
//!     ├── resizable       ResizableArray (heap, run-time extent)
//!     └── fixed           FixedArray1/2/3 (inline, const extent)
//! ```
//!
//! # Ownership model
//!
//! Exactly one owner (resizable or fixed) controls a buffer's lifetime;
//! views are pointer-plus-metadata values borrowing from it. Owners are
//! meant to live as named stack variables so Drop runs at scope exit.
//! Nothing here locks: concurrent writers need external synchronization.
//! The [`CacheLinePadded`] policy keeps logically adjacent slots on
//! distinct cache lines so independent writers stop false-sharing — a
//! layout guarantee, not a synchronization primitive.
//!
//! # Bounds checking
//!
//! The `bounds-checks` feature (default on) threads one compile-time
//! switch through every component; see [`bounds`] for the two failure
//! tiers. Disable default features for production kernels: the window
//! becomes zero-sized and every check compiles away.
//!
//! # Example
//!
//! ```
//! use dimbuf::{Dim1, PlainCell, Resizable2};
//!
//! fn fill_row(mut row: dimbuf::ViewMut<'_, PlainCell<f32>, Dim1>, value: f32) {
//!     for i in 0..row.len() as isize {
//!         *row.at_mut(i) = value;
//!     }
//! }
//!
//! let mut grid = Resizable2::<f32>::new((3, 4));
//! fill_row(grid.row_mut(1), 2.5);
//! assert_eq!(*grid.at(1, 2), 2.5);
//! assert_eq!(*grid.row(1).at(2), 2.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bounds;
pub mod dim;
pub mod fixed;
pub mod resizable;
pub mod view;

pub use bounds::BoundsWindow;
pub use dim::{Dim, Dim1, Dim2, Dim3};
pub use fixed::{FixedArray1, FixedArray2, FixedArray3};
pub use resizable::{Resizable1, Resizable2, Resizable3, ResizableArray};
pub use view::{View, ViewMut};

// The alignment surface is part of this crate's API: owners are generic
// over the policy and views over the cell type.
pub use dimbuf_alloc::{
    padded_size, AlignPolicy, BlockAligned, CacheLinePadded, Cell, DefaultAlign, PaddedCell,
    PlainCell, CACHE_LINE,
};
