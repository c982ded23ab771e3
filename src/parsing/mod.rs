//! Parsers for the evaluator's four input kinds.
//!
//! This module provides parsers for:
//!
//! - **FASTA files**: the assembly and reference sequence sets, plain or
//!   gzip compressed ([`fasta`])
//! - **PSL alignments**: 21-column BLAT output, per-block segments ([`psl`])
//! - **BLAST alignments**: 12-column tabular (outfmt 6) output ([`blast`])
//! - **Expression tables**: RSEM `*.isoforms.results` abundance estimates
//!   ([`expression`])
//!
//! The two alignment parsers implement the same [`AlignmentReader`] contract
//! and are selected at startup by [`AlignmentFormat`]; the resolution engine
//! never sees the format. Readers apply the strand-specificity filter;
//! [`read_alignments`] applies the minimum-aligned-length admission filter.

use std::io::BufRead;

use thiserror::Error;

use crate::core::alignment::TaggedAlignment;

pub mod blast;
pub mod expression;
pub mod fasta;
pub mod psl;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid {format} record at line {line}: {reason}")]
    InvalidRecord {
        format: &'static str,
        line: usize,
        reason: String,
    },

    #[error("invalid FASTA input: {0}")]
    InvalidFasta(String),

    #[error("invalid expression table: {0}")]
    InvalidExpression(String),

    #[error("duplicate sequence name: {0}")]
    DuplicateName(String),

    #[error("alignment refers to unknown sequence name: {0}")]
    UnknownName(String),

    #[error("{0}")]
    Unsupported(String),
}

/// The two supported alignment input formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AlignmentFormat {
    /// BLAT PSL, 21 tab-separated columns.
    Psl,
    /// BLAST tabular (outfmt 6), 12 tab-separated columns.
    Blast,
}

/// A sequential reader over one alignment file.
///
/// Implementations resolve sequence names against the two sequence sets,
/// derive dual-frame segments with per-frame mismatch positions, and drop
/// records rejected by the strand-specificity filter.
pub trait AlignmentReader {
    /// The next surviving record, or `None` at end of input.
    fn next_record(&mut self) -> Result<Option<TaggedAlignment>, ParseError>;
}

/// Drains a reader, keeping records whose total aligned length meets the
/// admission threshold.
pub fn read_alignments<R: AlignmentReader>(
    reader: &mut R,
    min_aligned_len: usize,
) -> Result<Vec<TaggedAlignment>, ParseError> {
    let mut alignments = Vec::new();
    while let Some(aln) = reader.next_record()? {
        if aln.meets_length_threshold(min_aligned_len) {
            alignments.push(aln);
        }
    }
    Ok(alignments)
}

/// Reads one line, returning `None` at end of input. Strips the trailing
/// newline, including a CR from CRLF input.
pub(crate) fn next_line<R: BufRead>(
    input: &mut R,
    buf: &mut String,
) -> Result<Option<()>, ParseError> {
    buf.clear();
    if input.read_line(buf)? == 0 {
        return Ok(None);
    }
    while buf.ends_with('\n') || buf.ends_with('\r') {
        buf.pop();
    }
    Ok(Some(()))
}

/// Case-insensitive base equality (N equals N).
pub(crate) fn bases_match(a: u8, b: u8) -> bool {
    a.to_ascii_uppercase() == b.to_ascii_uppercase()
}

/// Watson-Crick complement, case-insensitive; non-ACGT symbols pass through.
pub(crate) fn complement(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' => b'A',
        other => other,
    }
}
