//! Core data types for alignment-based assembly evaluation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`AlignmentSegment`](segment::AlignmentSegment): one aligned block with
//!   paired source/target coordinate ranges and per-frame mismatch positions,
//!   plus the interval algebra ([`intersects`](segment::intersects),
//!   [`subtract_in_place`](segment::subtract_in_place)) the resolver runs on
//! - [`TaggedAlignment`](alignment::TaggedAlignment): one alignment record
//!   with its sequence indexes and cached contribution
//! - [`SequenceSet`](sequence::SequenceSet): names, sequences, lengths, and
//!   the name→index lookup for one side of the evaluation
//! - [`StatsTuple`](stats::StatsTuple), [`EvalSummary`](stats::EvalSummary):
//!   result tuples and the F1 combination rule

pub mod alignment;
pub mod segment;
pub mod sequence;
pub mod stats;
