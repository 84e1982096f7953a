//! Storage cells, alignment policies, and aligned heap blocks.
//!
//! This is the leaf crate of the dimbuf workspace and the only one that
//! performs raw allocation. It answers one question for the array types
//! layered on top: given an element type and an alignment policy, how is
//! a contiguous block of `count` constructed elements laid out in memory?
//!
//! # Architecture
//!
//! ```text
//! AlignPolicy (compile-time selector)
//! ├── DefaultAlign      → PlainCell<T>,  block aligned to 128
//! ├── BlockAligned<N>   → PlainCell<T>,  block aligned to N (power of two)
//! └── CacheLinePadded   → PaddedCell<T>, each element on its own line
//!
//! HeapBlock<T, A> — aligned allocation of `count` policy cells,
//! every cell default-constructed on creation, dropped in order on Drop.
//! ```
//!
//! Allocation failure is fatal (`handle_alloc_error`); there is no
//! recoverable out-of-memory path at this layer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod align;
pub mod block;
pub mod cell;

pub use align::{AlignPolicy, BlockAligned, CacheLinePadded, DefaultAlign};
pub use block::HeapBlock;
pub use cell::{padded_size, Cell, PaddedCell, PlainCell, CACHE_LINE};
