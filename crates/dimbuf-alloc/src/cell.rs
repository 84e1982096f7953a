//! Storage cells: tight and cache-line-padded element carriers.
//!
//! A [`Cell`] wraps exactly one element and fixes its in-memory footprint.
//! [`PlainCell`] is layout-identical to the element. [`PaddedCell`] rounds
//! the footprint up to a full cache line so that arrays of it never share
//! or straddle a line — the layout guarantee that lets independent threads
//! write logically adjacent slots without false-sharing traffic.

/// Cache line size assumed throughout the workspace, in bytes.
pub const CACHE_LINE: usize = 64;

/// Round `size` up to the next multiple of [`CACHE_LINE`].
///
/// `padded_size(0) == 0`; every other input rounds upward.
/// This is the footprint of a [`PaddedCell`] over an element of `size`
/// bytes (for element alignments up to the cache line).
pub const fn padded_size(size: usize) -> usize {
    (size + CACHE_LINE - 1) & !(CACHE_LINE - 1)
}

/// A storage carrier for exactly one element.
///
/// Cells expose the element only through explicit accessors — there are
/// no implicit conversions between a cell and its element. Array views
/// dereference through [`Cell::get`]/[`Cell::get_mut`] so that the same
/// indexing code serves tight and padded storage.
pub trait Cell {
    /// The wrapped element type.
    type Elem;

    /// Wrap an element.
    fn new(value: Self::Elem) -> Self;

    /// Shared access to the element.
    fn get(&self) -> &Self::Elem;

    /// Exclusive access to the element.
    fn get_mut(&mut self) -> &mut Self::Elem;

    /// Unwrap the element.
    fn into_inner(self) -> Self::Elem;
}

/// Tight carrier: layout-identical to the element itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct PlainCell<T>(T);

impl<T> Cell for PlainCell<T> {
    type Elem = T;

    #[inline]
    fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    fn get(&self) -> &T {
        &self.0
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    #[inline]
    fn into_inner(self) -> T {
        self.0
    }
}

/// Cache-line-padded carrier.
///
/// `size_of::<PaddedCell<T>>() == padded_size(size_of::<T>())` for any
/// `T` with `align_of::<T>() <= CACHE_LINE`. Consecutive padded cells
/// therefore start on distinct cache lines.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(align(64))]
pub struct PaddedCell<T> {
    value: T,
}

impl<T> Cell for PaddedCell<T> {
    type Elem = T;

    #[inline]
    fn new(value: T) -> Self {
        Self { value }
    }

    #[inline]
    fn get(&self) -> &T {
        &self.value
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[inline]
    fn into_inner(self) -> T {
        self.value
    }
}
