//! Parser for FASTA files using noodles.
//!
//! Loads full sequences (the mismatch derivation in the alignment parsers
//! needs the raw bases, not just lengths) into a [`SequenceSet`].
//! Supports both uncompressed and gzip/bgzip compressed files.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::core::sequence::SequenceSet;
use crate::parsing::ParseError;

/// Check if the path is a gzipped file
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a FASTA file into a sequence set.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read,
/// `ParseError::InvalidFasta` if parsing fails or no sequences are found,
/// or `ParseError::DuplicateName` on a repeated record name.
pub fn read_fasta(path: &Path) -> Result<SequenceSet, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(GzDecoder::new(file));
        read_fasta_reader(&mut fasta::io::Reader::new(reader))
    } else {
        let reader = BufReader::new(file);
        read_fasta_reader(&mut fasta::io::Reader::new(reader))
    }
}

/// Parse from a noodles FASTA reader
fn read_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<SequenceSet, ParseError> {
    let mut names = Vec::new();
    let mut seqs: Vec<Vec<u8>> = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::InvalidFasta(format!("failed to parse record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        if names.contains(&name) {
            return Err(ParseError::DuplicateName(name));
        }

        seqs.push(record.sequence().as_ref().to_vec());
        names.push(name);
    }

    if names.is_empty() {
        return Err(ParseError::InvalidFasta(
            "no sequences found in FASTA file".to_string(),
        ));
    }

    Ok(SequenceSet::new(names, seqs))
}
