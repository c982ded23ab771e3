//! # asm-eval
//!
//! A library for scoring a transcriptome assembly against a reference
//! transcript set using pre-computed pairwise alignments.
//!
//! Given an assembly ("A"), a reference ("B"), and alignments in both
//! directions, `asm-eval` reports weighted precision, recall and F1 under
//! five definitions of a "unit of agreement": single positions, position
//! pairs, spaced position pairs, fixed-length windows, and whole sequences
//! recovered nearly in full.
//!
//! The heart of the crate is the greedy overlap resolver: redundant,
//! overlapping alignments to the same sequences are reduced to a set of
//! non-overlapping claims, so that no unit of a target sequence is credited
//! more than once. Each metric supplies its own accounting policy; a
//! priority queue keyed by weighted coverage-unit counts decides, greedily,
//! which alignment wins each contested region.
//!
//! ## Example
//!
//! ```rust,no_run
//! use asm_eval::matching::orchestrator::evaluate_weighting;
//! use asm_eval::parsing::{fasta::read_fasta, psl::PslReader, read_alignments};
//! use std::path::Path;
//!
//! let assembly = read_fasta(Path::new("assembly.fa")).unwrap();
//! let reference = read_fasta(Path::new("reference.fa")).unwrap();
//! let readlen = 76;
//!
//! let file = std::fs::File::open("a_to_b.psl").unwrap();
//! let mut reader = PslReader::new(
//!     std::io::BufReader::new(file),
//!     &assembly,
//!     &reference,
//!     false,
//! );
//! let a_to_b = read_alignments(&mut reader, readlen).unwrap();
//! // ... read b_to_a the same way, with the sets swapped ...
//! # let b_to_a = Vec::new();
//!
//! let (scored, _coverage) = evaluate_weighting(
//!     &a_to_b,
//!     &b_to_a,
//!     &assembly.lengths,
//!     &reference.lengths,
//!     &assembly.uniform_weights(),
//!     &reference.uniform_weights(),
//!     readlen,
//! );
//! println!("nucleotide F1: {:.4}", scored.f1.nucl);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: segments, alignments, sequence sets, result tuples
//! - [`coverage`]: the four coverage-unit counters
//! - [`matching`]: metric policies, the greedy overlap resolver, and the
//!   orchestrator
//! - [`parsing`]: FASTA, PSL, BLAST and expression-table parsers
//! - [`report`]: report and plot sinks
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod coverage;
pub mod matching;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::core::alignment::TaggedAlignment;
pub use crate::core::segment::{AlignmentSegment, Frame};
pub use crate::core::sequence::SequenceSet;
pub use crate::core::stats::{EvalSummary, ScoredStats, StatsTuple};
pub use crate::matching::policy::MetricPolicy;
