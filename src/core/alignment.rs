//! A parsed alignment record tagged with the indexes of its two sequences.

use crate::core::segment::{aligned_length, AlignmentSegment};

/// One alignment between a source sequence and a target sequence, reduced to
/// its ordered, pairwise non-overlapping aligned blocks.
///
/// `contribution` caches the alignment's current weighted coverage-unit count
/// under whichever metric is being resolved. It is recomputed whenever the
/// segments are trimmed and is only meaningful inside a single resolver run;
/// each run receives its own value copy of the batch.
#[derive(Debug, Clone)]
pub struct TaggedAlignment {
    /// Index into the source sequence set.
    pub a_idx: usize,
    /// Index into the target sequence set.
    pub b_idx: usize,
    pub segments: Vec<AlignmentSegment>,
    pub contribution: f64,
}

impl TaggedAlignment {
    pub fn new(a_idx: usize, b_idx: usize, segments: Vec<AlignmentSegment>) -> Self {
        Self {
            a_idx,
            b_idx,
            segments,
            contribution: 0.0,
        }
    }

    /// Total remaining aligned length, measured in the source frame.
    pub fn aligned_length(&self) -> usize {
        aligned_length(&self.segments)
    }

    /// Whether the alignment still covers enough of the source sequence to be
    /// worth keeping. `min_len` is the read length used as the admission
    /// threshold throughout one evaluation.
    pub fn meets_length_threshold(&self, min_len: usize) -> bool {
        self.aligned_length() >= min_len
    }
}
