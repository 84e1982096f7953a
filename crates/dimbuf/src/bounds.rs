//! Optional per-view bounds window.
//!
//! A [`BoundsWindow`] is the inclusive range of linear indices a view
//! considers valid, expressed in the view's own index space: sub-views
//! and origin-shifted views carry a shifted copy of their parent's
//! window, so index 0 of the child can legitimately map to a negative
//! window start.
//!
//! The whole mechanism is toggled by the `bounds-checks` cargo feature.
//! With the feature off the window is a zero-sized no-op and [`gate`]
//! is the identity — indexing costs exactly what raw pointer arithmetic
//! costs, and out-of-range access is undefined behaviour like a raw
//! array. With the feature on there are two failure tiers:
//!
//! - debug assertions live: an out-of-range offset panics;
//! - debug assertions inert: the offset is redirected to 0, so the
//!   access reads or writes the view's first element instead of
//!   corrupting memory (fail-soft: wrong data, no segfault).
//!
//! [`gate`]: BoundsWindow::gate

/// Inclusive valid-index window over a view's linear index space.
#[cfg(feature = "bounds-checks")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsWindow {
    start: isize,
    end: isize,
}

#[cfg(feature = "bounds-checks")]
impl BoundsWindow {
    /// Window covering `[0, len - 1]`. Empty when `len == 0`.
    pub fn full(len: usize) -> Self {
        Self {
            start: 0,
            end: len as isize - 1,
        }
    }

    /// The empty window `[0, -1]`: every offset is out of bounds.
    pub fn empty() -> Self {
        Self { start: 0, end: -1 }
    }

    /// Replace the window unconditionally.
    pub fn set(&mut self, start: isize, end: isize) {
        self.start = start;
        self.end = end;
    }

    /// Shift both ends by `delta`.
    ///
    /// Used when a sub-view or offset view is produced: the child's
    /// window stays aligned with the parent's true valid region while
    /// being expressed against the child's own index 0.
    pub fn shift(&mut self, delta: isize) {
        self.start += delta;
        self.end += delta;
    }

    /// Rescale both ends by `new_size / old_size` in integer arithmetic.
    ///
    /// Used when a view is reinterpreted as holding elements of a
    /// different size. Each end becomes `end * new_size / old_size`,
    /// multiplying before dividing so truncation happens once, on the
    /// rescaled value.
    pub fn rescale(&mut self, old_size: usize, new_size: usize) {
        assert!(old_size != 0 && new_size != 0, "zero-sized reinterpret");
        self.start = self.start * new_size as isize / old_size as isize;
        self.end = self.end * new_size as isize / old_size as isize;
    }

    /// Whether `x` lies inside the window.
    #[inline]
    pub fn contains(&self, x: isize) -> bool {
        x >= self.start && x <= self.end
    }

    /// Pull the window's end down to `max_end` if it lies beyond it.
    pub fn limit_end(&mut self, max_end: isize) {
        self.end = self.end.min(max_end);
    }

    /// Length of the longest prefix `[0, n)` of `len` offsets that lies
    /// entirely inside the window.
    ///
    /// Zero when the window excludes offset 0, otherwise `end + 1`
    /// capped at `len`. Slice construction uses this so a slice never
    /// extends past the window.
    #[inline]
    pub fn prefix_len(&self, len: usize) -> usize {
        if self.start > 0 || self.end < 0 {
            return 0;
        }
        len.min(self.end as usize + 1)
    }

    /// Gate a linear offset before it is dereferenced.
    ///
    /// In-bounds offsets pass through unchanged. Out-of-range offsets
    /// panic when debug assertions are live, and otherwise redirect to
    /// offset 0 of the same view.
    #[inline]
    pub fn gate(&self, x: isize) -> isize {
        debug_assert!(
            self.contains(x),
            "index {x} outside bounds window [{}, {}]",
            self.start,
            self.end
        );
        if self.contains(x) {
            x
        } else {
            0
        }
    }

    /// Window start (for inspection and tests).
    pub fn start(&self) -> isize {
        self.start
    }

    /// Window end, inclusive (for inspection and tests).
    pub fn end(&self) -> isize {
        self.end
    }
}

/// No-op bounds window: the `bounds-checks` feature is disabled.
///
/// Zero-sized; every setter is a no-op, [`BoundsWindow::contains`] is
/// unconditionally true and [`BoundsWindow::gate`] is the identity.
#[cfg(not(feature = "bounds-checks"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundsWindow;

#[cfg(not(feature = "bounds-checks"))]
impl BoundsWindow {
    /// Window covering the full extent (no-op).
    pub fn full(_len: usize) -> Self {
        Self
    }

    /// The empty window (no-op).
    pub fn empty() -> Self {
        Self
    }

    /// Replace the window (no-op).
    pub fn set(&mut self, _start: isize, _end: isize) {}

    /// Shift both ends (no-op).
    pub fn shift(&mut self, _delta: isize) {}

    /// Rescale both ends (no-op).
    pub fn rescale(&mut self, _old_size: usize, _new_size: usize) {}

    /// Pull the window's end down (no-op).
    pub fn limit_end(&mut self, _max_end: isize) {}

    /// The full extent: there is no window to clamp against.
    #[inline]
    pub fn prefix_len(&self, len: usize) -> usize {
        len
    }

    /// Always in bounds.
    #[inline]
    pub fn contains(&self, _x: isize) -> bool {
        true
    }

    /// Identity: no check executes.
    #[inline]
    pub fn gate(&self, x: isize) -> isize {
        x
    }
}
