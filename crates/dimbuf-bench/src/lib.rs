//! Shared helpers for the dimbuf benchmark suite.

#![deny(missing_docs)]

use dimbuf::Resizable1;

/// Deterministically fill a rank-1 array from a seed, returning it.
///
/// Benches need identical data across runs; this avoids pulling the rng
/// into the measured section.
pub fn filled_array(len: usize, seed: f32) -> Resizable1<f32> {
    let mut a = Resizable1::<f32>::new(len);
    for i in 0..len as isize {
        *a.at_mut(i) = seed + i as f32 * 0.5;
    }
    a
}
