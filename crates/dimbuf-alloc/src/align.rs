//! Compile-time alignment policies.
//!
//! A policy fixes two things at the type level: the cell type that
//! carries each element ([`PlainCell`] or [`PaddedCell`]) and the
//! alignment of a whole heap block. Policies are zero-sized selector
//! types; picking one costs nothing at runtime.

use crate::cell::{Cell, PaddedCell, PlainCell};

/// Compile-time alignment policy for array storage.
pub trait AlignPolicy {
    /// The storage cell carrying one element under this policy.
    type Cell<T>: Cell<Elem = T>;

    /// Alignment of a heap-allocated block, in bytes. Always a power
    /// of two.
    const BLOCK_ALIGN: usize;
}

/// Default policy: tight cells, whole block aligned to 128 bytes.
///
/// 128 is a sensible default for SIMD kernels — wide enough for any
/// current vector register file and a multiple of the cache line.
pub struct DefaultAlign;

impl AlignPolicy for DefaultAlign {
    type Cell<T> = PlainCell<T>;
    const BLOCK_ALIGN: usize = 128;
}

/// Explicit block alignment: tight cells, whole block aligned to `N`.
///
/// `N` must be a power of two; anything else fails at build time when
/// the policy is instantiated, never at run time.
pub struct BlockAligned<const N: usize>;

impl<const N: usize> AlignPolicy for BlockAligned<N> {
    type Cell<T> = PlainCell<T>;
    const BLOCK_ALIGN: usize = {
        assert!(N.is_power_of_two(), "block alignment must be a power of two");
        N
    };
}

/// False-sharing avoidance: every element padded to a full cache line,
/// whole block aligned to 128 bytes.
///
/// This is a layout guarantee, not a synchronization primitive —
/// concurrent writers still need external synchronization, they just
/// stop invalidating each other's cache lines.
pub struct CacheLinePadded;

impl AlignPolicy for CacheLinePadded {
    type Cell<T> = PaddedCell<T>;
    const BLOCK_ALIGN: usize = 128;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CACHE_LINE;
    use std::mem::size_of;

    #[test]
    fn default_policy_uses_tight_cells() {
        assert_eq!(
            size_of::<<DefaultAlign as AlignPolicy>::Cell<f32>>(),
            size_of::<f32>()
        );
        assert_eq!(DefaultAlign::BLOCK_ALIGN, 128);
    }

    #[test]
    fn explicit_policy_exposes_its_alignment() {
        assert_eq!(<BlockAligned<32>>::BLOCK_ALIGN, 32);
        assert_eq!(<BlockAligned<4096>>::BLOCK_ALIGN, 4096);
    }

    #[test]
    fn cache_line_policy_pads_every_element() {
        assert_eq!(
            size_of::<<CacheLinePadded as AlignPolicy>::Cell<u8>>(),
            CACHE_LINE
        );
        assert_eq!(CacheLinePadded::BLOCK_ALIGN, 128);
    }
}
