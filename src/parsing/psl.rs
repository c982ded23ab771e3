//! Parser for BLAT PSL alignments.
//!
//! PSL records are 21 tab-separated columns with block lists in the last
//! three; block coordinates for minus-strand queries are given on the
//! reverse-complemented query, which this parser maps back to forward
//! coordinates as reversed source-frame ranges. Mismatch positions are
//! derived per block by comparing the actual sequences (complement-aware on
//! the minus strand). The optional psLayout header is skipped.

use std::io::BufRead;
use std::str::FromStr;

use crate::core::alignment::TaggedAlignment;
use crate::core::segment::AlignmentSegment;
use crate::core::sequence::SequenceSet;
use crate::parsing::{bases_match, complement, next_line, AlignmentReader, ParseError};

const FORMAT: &str = "PSL";
const PSL_FIELDS: usize = 21;

/// Sequential reader over one PSL file.
pub struct PslReader<'a, R: BufRead> {
    input: R,
    src: &'a SequenceSet,
    dst: &'a SequenceSet,
    strand_specific: bool,
    line_no: usize,
    seen_record: bool,
    buf: String,
}

impl<'a, R: BufRead> PslReader<'a, R> {
    /// A reader resolving query names against `src` (the aligned set) and
    /// target names against `dst` (the covered set). With `strand_specific`,
    /// minus-strand records are dropped.
    pub fn new(input: R, src: &'a SequenceSet, dst: &'a SequenceSet, strand_specific: bool) -> Self {
        Self {
            input,
            src,
            dst,
            strand_specific,
            line_no: 0,
            seen_record: false,
            buf: String::new(),
        }
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

    fn parse_block_list(&self, value: &str, what: &str) -> Result<Vec<usize>, ParseError> {
        value
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| self.parse_field(s, what))
            .collect()
    }

    fn parse_record(&self, fields: &[&str]) -> Result<Option<TaggedAlignment>, ParseError> {
        let strand = fields[8];
        let forward = match strand.chars().next() {
            Some('+') => true,
            Some('-') => false,
            _ => return Err(self.invalid(format!("bad strand: '{strand}'"))),
        };
        if self.strand_specific && !forward {
            return Ok(None);
        }

        let q_name = fields[9];
        let t_name = fields[13];
        let a_idx = self
            .src
            .index_of(q_name)
            .ok_or_else(|| ParseError::UnknownName(q_name.to_string()))?;
        let b_idx = self
            .dst
            .index_of(t_name)
            .ok_or_else(|| ParseError::UnknownName(t_name.to_string()))?;

        let q_size: usize = self.parse_field(fields[10], "query size")?;
        if q_size != self.src.lengths[a_idx] {
            return Err(self.invalid(format!(
                "query size {q_size} does not match sequence '{q_name}' of length {}",
                self.src.lengths[a_idx]
            )));
        }

        let block_count: usize = self.parse_field(fields[17], "block count")?;
        let sizes = self.parse_block_list(fields[18], "block size")?;
        let q_starts = self.parse_block_list(fields[19], "query start")?;
        let t_starts = self.parse_block_list(fields[20], "target start")?;
        if sizes.len() != block_count || q_starts.len() != block_count || t_starts.len() != block_count
        {
            return Err(self.invalid("block list lengths disagree with block count"));
        }

        let q_seq = &self.src.seqs[a_idx];
        let t_seq = &self.dst.seqs[b_idx];
        let mut segments = Vec::with_capacity(block_count);

        for ((&size, &qs), &ts) in sizes.iter().zip(&q_starts).zip(&t_starts) {
            if size == 0 {
                continue;
            }
            if qs + size > q_size || ts + size > t_seq.len() {
                return Err(self.invalid("block exceeds sequence bounds"));
            }

            let mut a_mismatches = Vec::new();
            let mut b_mismatches = Vec::new();
            for j in 0..size {
                // Minus-strand block coordinates count from the 3' end of
                // the query; map them back to forward positions.
                let a_pos = if forward { qs + j } else { q_size - 1 - (qs + j) };
                let b_pos = ts + j;
                let q_base = if forward { q_seq[a_pos] } else { complement(q_seq[a_pos]) };
                if !bases_match(q_base, t_seq[b_pos]) {
                    a_mismatches.push(a_pos);
                    b_mismatches.push(b_pos);
                }
            }

            let (a_start, a_end) = if forward {
                (qs, qs + size - 1)
            } else {
                (q_size - 1 - qs, q_size - qs - size)
            };
            segments.push(AlignmentSegment {
                a_start,
                a_end,
                b_start: ts,
                b_end: ts + size - 1,
                a_mismatches,
                b_mismatches,
            });
        }

        Ok(Some(TaggedAlignment::new(a_idx, b_idx, segments)))
    }
}

impl<R: BufRead> AlignmentReader for PslReader<'_, R> {
    fn next_record(&mut self) -> Result<Option<TaggedAlignment>, ParseError> {
        loop {
            if next_line(&mut self.input, &mut self.buf)?.is_none() {
                return Ok(None);
            }
            self.line_no += 1;
            if self.buf.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = self.buf.split('\t').collect();
            let looks_like_record =
                fields.len() >= PSL_FIELDS && fields[0].parse::<u64>().is_ok();
            if !looks_like_record {
                // psLayout banner, column headers and separator precede the
                // first record; anything malformed after that is an error.
                if self.seen_record {
                    return Err(self.invalid("expected 21 tab-separated fields"));
                }
                continue;
            }
            self.seen_record = true;

            if let Some(aln) = self.parse_record(&fields)? {
                return Ok(Some(aln));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::read_alignments;

    fn sets() -> (SequenceSet, SequenceSet) {
        // Query "q1" matches target "t1" exactly over its first 8 bases.
        let src = SequenceSet::new(vec!["q1".to_string()], vec![b"AACCGGTT".to_vec()]);
        let dst = SequenceSet::new(
            vec!["t1".to_string()],
            vec![b"AACCGGTTACGT".to_vec()],
        );
        (src, dst)
    }

    fn psl_line(strand: &str, sizes: &str, q_starts: &str, t_starts: &str) -> String {
        let blocks = sizes.split(',').filter(|s| !s.is_empty()).count();
        format!(
            "8\t0\t0\t0\t0\t0\t0\t0\t{strand}\tq1\t8\t0\t8\tt1\t12\t0\t8\t{blocks}\t{sizes}\t{q_starts}\t{t_starts}\n"
        )
    }

    #[test]
    fn test_single_block_plus_strand() {
        let (src, dst) = sets();
        let input = psl_line("+", "8,", "0,", "0,");
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        let aln = reader.next_record().unwrap().unwrap();
        assert_eq!((aln.a_idx, aln.b_idx), (0, 0));
        assert_eq!(aln.segments.len(), 1);
        let seg = &aln.segments[0];
        assert_eq!((seg.a_start, seg.a_end), (0, 7));
        assert_eq!((seg.b_start, seg.b_end), (0, 7));
        assert!(seg.a_mismatches.is_empty());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_multi_block_record() {
        let (src, dst) = sets();
        let input = psl_line("+", "2,3,", "0,4,", "0,4,");
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        let aln = reader.next_record().unwrap().unwrap();
        assert_eq!(aln.segments.len(), 2);
        assert_eq!(
            (aln.segments[1].a_start, aln.segments[1].a_end),
            (4, 6)
        );
        assert_eq!(aln.aligned_length(), 5);
    }

    #[test]
    fn test_mismatch_positions_derived_from_sequences() {
        let src = SequenceSet::new(vec!["q1".to_string()], vec![b"AACCGGTT".to_vec()]);
        let dst = SequenceSet::new(vec!["t1".to_string()], vec![b"AACTGGTTACGT".to_vec()]);
        let input = psl_line("+", "8,", "0,", "0,");
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        let aln = reader.next_record().unwrap().unwrap();
        assert_eq!(aln.segments[0].a_mismatches, vec![3]);
        assert_eq!(aln.segments[0].b_mismatches, vec![3]);
    }

    #[test]
    fn test_minus_strand_reverses_source_frame() {
        // Reverse complement of "AACCGGTT"[4..8] = "GGTT" is "AACC", which
        // matches the target's first four bases.
        let (src, dst) = sets();
        let input = psl_line("-", "4,", "0,", "0,");
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        let aln = reader.next_record().unwrap().unwrap();
        let seg = &aln.segments[0];
        assert_eq!((seg.a_start, seg.a_end), (7, 4));
        assert_eq!((seg.b_start, seg.b_end), (0, 3));
        assert!(seg.a_mismatches.is_empty());
    }

    #[test]
    fn test_strand_specific_drops_minus_records() {
        let (src, dst) = sets();
        let input = format!("{}{}", psl_line("-", "4,", "0,", "0,"), psl_line("+", "8,", "0,", "0,"));
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, true);
        let alignments = read_alignments(&mut reader, 1).unwrap();
        assert_eq!(alignments.len(), 1);
        assert_eq!(alignments[0].aligned_length(), 8);
    }

    #[test]
    fn test_ps_layout_header_skipped() {
        let (src, dst) = sets();
        let input = format!(
            "psLayout version 3\n\nmatch\tmis- \trep. \tN's\n---------------------------------\n{}",
            psl_line("+", "8,", "0,", "0,")
        );
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        assert!(reader.next_record().unwrap().is_some());
    }

    #[test]
    fn test_unknown_name_is_error() {
        let (src, dst) = sets();
        let input = psl_line("+", "8,", "0,", "0,").replace("t1", "t9");
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::UnknownName(name)) if name == "t9"
        ));
    }

    #[test]
    fn test_malformed_record_after_first_is_error() {
        let (src, dst) = sets();
        let input = format!("{}not\ta\trecord\n", psl_line("+", "8,", "0,", "0,"));
        let mut reader = PslReader::new(input.as_bytes(), &src, &dst, false);
        assert!(reader.next_record().unwrap().is_some());
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::InvalidRecord { .. })
        ));
    }
}
