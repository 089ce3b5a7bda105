//! Scroll phase sampling
//!
//! Every section maps the single scroll offset into "which phase am I in and
//! how far through it" via a [`PhaseTrack`]: an ordered list of non-overlapping
//! ranges. Gaps between ranges are valid hold states — the sample pins to the
//! last boundary reached so re-entering a range never pops.

use crate::anim::sanitize_offset;

/// One scroll sub-range `[start, end)` a section animates over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseRange {
    pub start: f32,
    pub end: f32,
}

impl PhaseRange {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Degenerate ranges act as instantaneous thresholds.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

/// Result of sampling a track: the active (or last-resolved) phase and the
/// normalized progress through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample {
    /// Index into the track's ranges
    pub index: usize,
    /// Progress through that range, in [0, 1]
    pub local_t: f32,
}

/// An ordered, non-overlapping set of phase ranges for one section.
#[derive(Debug, Clone)]
pub struct PhaseTrack {
    ranges: Vec<PhaseRange>,
}

impl PhaseTrack {
    /// Build a track from ranges sorted by start. Adjacent ranges may touch
    /// but must not overlap; both conditions are debug-asserted.
    pub fn new(ranges: Vec<PhaseRange>) -> Self {
        debug_assert!(!ranges.is_empty(), "a phase track needs at least one range");
        for pair in ranges.windows(2) {
            debug_assert!(
                pair[0].end <= pair[1].start,
                "phase ranges must be sorted and non-overlapping"
            );
        }
        Self { ranges }
    }

    pub fn ranges(&self) -> &[PhaseRange] {
        &self.ranges
    }

    /// Map an offset to the active phase and local progress.
    ///
    /// - Inside range `i`: `(i, (offset - start) / (end - start))` clamped.
    /// - Before the first range: `(0, 0.0)` — the initial pose.
    /// - In a gap after range `i`: `(i, 1.0)` — hold at the last terminal pose.
    /// - Past the last range: `(last, 1.0)`.
    /// - Degenerate range: threshold at `start` (no division).
    ///
    /// Pure and allocation-free; the same offset always yields the same
    /// sample. Non-finite offsets are sanitized first.
    pub fn sample(&self, offset: f32) -> PhaseSample {
        let offset = sanitize_offset(offset);

        if offset < self.ranges[0].start {
            return PhaseSample { index: 0, local_t: 0.0 };
        }

        let mut resolved = PhaseSample { index: 0, local_t: 0.0 };
        for (index, range) in self.ranges.iter().enumerate() {
            if offset < range.start {
                // In the gap before this range: hold whatever resolved last.
                return resolved;
            }
            if range.is_degenerate() {
                // Threshold crossed (offset >= start).
                resolved = PhaseSample { index, local_t: 1.0 };
                continue;
            }
            if offset < range.end {
                let local_t = ((offset - range.start) / (range.end - range.start)).clamp(0.0, 1.0);
                return PhaseSample { index, local_t };
            }
            resolved = PhaseSample { index, local_t: 1.0 };
        }
        resolved
    }

    /// Cumulative progress through range `index`: 0 before it starts, the
    /// local progress inside it, 1 once the offset has passed it. Lets a
    /// section read all of its sequential sub-phases at once.
    pub fn progress_through(&self, offset: f32, index: usize) -> f32 {
        let offset = sanitize_offset(offset);
        let Some(range) = self.ranges.get(index) else {
            return 0.0;
        };
        if range.is_degenerate() {
            return if offset >= range.start { 1.0 } else { 0.0 };
        }
        ((offset - range.start) / (range.end - range.start)).clamp(0.0, 1.0)
    }
}
