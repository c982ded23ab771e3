//! Parser for BLAST tabular (outfmt 6) alignments.
//!
//! Tabular records are 12 columns with 1-based inclusive coordinates and a
//! single span per record; a reverse-strand hit is expressed by a subject
//! range running backwards. The format carries no query strand, so it is
//! incompatible with strand-specific filtering. It also cannot localize
//! indels, so records whose query and subject spans differ in length are
//! skipped with a warning.

use std::io::BufRead;
use std::str::FromStr;

use tracing::warn;

use crate::core::alignment::TaggedAlignment;
use crate::core::segment::AlignmentSegment;
use crate::core::sequence::SequenceSet;
use crate::parsing::{bases_match, complement, next_line, AlignmentReader, ParseError};

const FORMAT: &str = "BLAST";
const BLAST_FIELDS: usize = 12;

/// Sequential reader over one BLAST tabular file.
pub struct BlastReader<'a, R: BufRead> {
    input: R,
    src: &'a SequenceSet,
    dst: &'a SequenceSet,
    line_no: usize,
    buf: String,
}

impl<'a, R: BufRead> BlastReader<'a, R> {
    /// A reader resolving query names against `src` and subject names
    /// against `dst`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Unsupported` when `strand_specific` is
    /// requested: tabular BLAST output does not record the query strand.
    pub fn new(
        input: R,
        src: &'a SequenceSet,
        dst: &'a SequenceSet,
        strand_specific: bool,
    ) -> Result<Self, ParseError> {
        if strand_specific {
            return Err(ParseError::Unsupported(
                "strand-specific filtering is not supported for BLAST alignments".to_string(),
            ));
        }
        Ok(Self {
            input,
            src,
            dst,
            line_no: 0,
            buf: String::new(),
        })
    }

    fn invalid(&self, reason: impl Into<String>) -> ParseError {
        ParseError::InvalidRecord {
            format: FORMAT,
            line: self.line_no,
            reason: reason.into(),
        }
    }

    fn parse_field<T: FromStr>(&self, value: &str, what: &str) -> Result<T, ParseError> {
        value
            .parse()
            .map_err(|_| self.invalid(format!("bad {what}: '{value}'")))
    }

    fn parse_record(&self, fields: &[&str]) -> Result<Option<TaggedAlignment>, ParseError> {
        let q_name = fields[0];
        let s_name = fields[1];
        let a_idx = self
            .src
            .index_of(q_name)
            .ok_or_else(|| ParseError::UnknownName(q_name.to_string()))?;
        let b_idx = self
            .dst
            .index_of(s_name)
            .ok_or_else(|| ParseError::UnknownName(s_name.to_string()))?;

        let q_start: usize = self.parse_field(fields[6], "query start")?;
        let q_end: usize = self.parse_field(fields[7], "query end")?;
        let s_start: usize = self.parse_field(fields[8], "subject start")?;
        let s_end: usize = self.parse_field(fields[9], "subject end")?;
        if q_start == 0 || q_end == 0 || s_start == 0 || s_end == 0 {
            return Err(self.invalid("coordinates are 1-based and cannot be 0"));
        }
        if q_start > q_end {
            return Err(self.invalid("query range runs backwards"));
        }

        let len = q_end - q_start + 1;
        if s_start.abs_diff(s_end) + 1 != len {
            // outfmt 6 gives no way to place the indels within the span.
            warn!(
                line = self.line_no,
                query = q_name,
                subject = s_name,
                "skipping gapped record: query and subject spans differ in length"
            );
            return Ok(None);
        }

        let q_seq = &self.src.seqs[a_idx];
        let s_seq = &self.dst.seqs[b_idx];
        if q_end > q_seq.len() || s_start.max(s_end) > s_seq.len() {
            return Err(self.invalid("span exceeds sequence bounds"));
        }

        let s_forward = s_start <= s_end;
        let mut a_mismatches = Vec::new();
        let mut b_mismatches = Vec::new();
        for j in 0..len {
            let a_pos = q_start - 1 + j;
            let b_pos = if s_forward { s_start - 1 + j } else { s_start - 1 - j };
            // A minus-strand hit aligns the query to the subject's reverse
            // complement.
            let s_base = if s_forward { s_seq[b_pos] } else { complement(s_seq[b_pos]) };
            if !bases_match(q_seq[a_pos], s_base) {
                a_mismatches.push(a_pos);
                b_mismatches.push(b_pos);
            }
        }

        let segment = AlignmentSegment {
            a_start: q_start - 1,
            a_end: q_end - 1,
            b_start: s_start - 1,
            b_end: s_end - 1,
            a_mismatches,
            b_mismatches,
        };
        Ok(Some(TaggedAlignment::new(a_idx, b_idx, vec![segment])))
    }
}

impl<R: BufRead> AlignmentReader for BlastReader<'_, R> {
    fn next_record(&mut self) -> Result<Option<TaggedAlignment>, ParseError> {
        loop {
            if next_line(&mut self.input, &mut self.buf)?.is_none() {
                return Ok(None);
            }
            self.line_no += 1;
            let line = self.buf.trim();
            // outfmt 7 interleaves comment lines; tolerate them.
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = self.buf.split('\t').collect();
            if fields.len() < BLAST_FIELDS {
                return Err(self.invalid("expected 12 tab-separated fields"));
            }

            if let Some(aln) = self.parse_record(&fields)? {
                return Ok(Some(aln));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> (SequenceSet, SequenceSet) {
        let src = SequenceSet::new(vec!["q1".to_string()], vec![b"AACCGGTT".to_vec()]);
        let dst = SequenceSet::new(
            vec!["t1".to_string()],
            vec![b"AACCGGTTACGT".to_vec()],
        );
        (src, dst)
    }

    fn blast_line(qs: usize, qe: usize, ss: usize, se: usize) -> String {
        format!("q1\tt1\t100.00\t8\t0\t0\t{qs}\t{qe}\t{ss}\t{se}\t1e-10\t42.0\n")
    }

    #[test]
    fn test_forward_record() {
        let (src, dst) = sets();
        let input = blast_line(1, 8, 1, 8);
        let mut reader = BlastReader::new(input.as_bytes(), &src, &dst, false).unwrap();
        let aln = reader.next_record().unwrap().unwrap();
        let seg = &aln.segments[0];
        assert_eq!((seg.a_start, seg.a_end), (0, 7));
        assert_eq!((seg.b_start, seg.b_end), (0, 7));
        assert!(seg.a_mismatches.is_empty());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_reverse_subject_record() {
        // Query "AACC" against the reverse complement of target [4, 8),
        // which is "AACC": an exact minus-strand hit.
        let (src, dst) = sets();
        let input = blast_line(1, 4, 8, 5);
        let mut reader = BlastReader::new(input.as_bytes(), &src, &dst, false).unwrap();
        let aln = reader.next_record().unwrap().unwrap();
        let seg = &aln.segments[0];
        assert_eq!((seg.a_start, seg.a_end), (0, 3));
        assert_eq!((seg.b_start, seg.b_end), (7, 4));
        assert!(seg.a_mismatches.is_empty());
    }

    #[test]
    fn test_gapped_record_skipped() {
        let (src, dst) = sets();
        let input = format!("{}{}", blast_line(1, 8, 1, 7), blast_line(1, 8, 1, 8));
        let mut reader = BlastReader::new(input.as_bytes(), &src, &dst, false).unwrap();
        // First record is gapped (spans 8 vs 7) and silently skipped.
        let aln = reader.next_record().unwrap().unwrap();
        assert_eq!(aln.segments[0].b_end, 7);
    }

    #[test]
    fn test_comment_lines_tolerated() {
        let (src, dst) = sets();
        let input = format!("# BLASTN 2.12.0+\n# Query: q1\n{}", blast_line(1, 8, 1, 8));
        let mut reader = BlastReader::new(input.as_bytes(), &src, &dst, false).unwrap();
        assert!(reader.next_record().unwrap().is_some());
    }

    #[test]
    fn test_strand_specific_is_unsupported() {
        let (src, dst) = sets();
        assert!(matches!(
            BlastReader::new("".as_bytes(), &src, &dst, true),
            Err(ParseError::Unsupported(_))
        ));
    }

    #[test]
    fn test_mismatches_found() {
        let src = SequenceSet::new(vec!["q1".to_string()], vec![b"AACCGGTT".to_vec()]);
        let dst = SequenceSet::new(vec!["t1".to_string()], vec![b"AACTGGTTACGT".to_vec()]);
        let input = blast_line(1, 8, 1, 8);
        let mut reader = BlastReader::new(input.as_bytes(), &src, &dst, false).unwrap();
        let aln = reader.next_record().unwrap().unwrap();
        assert_eq!(aln.segments[0].a_mismatches, vec![3]);
        assert_eq!(aln.segments[0].b_mismatches, vec![3]);
    }
}
