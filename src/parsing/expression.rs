//! Parser for RSEM `*.isoforms.results` expression tables.
//!
//! The table is tab-separated with a header line; the first column is the
//! transcript id and the `TPM` column carries the abundance estimate. The
//! relative abundance of a transcript is its TPM scaled by 1e6, so the
//! resulting weight vector sums to 1 when the table covers the whole set.

use std::path::Path;

use crate::core::sequence::SequenceSet;
use crate::parsing::ParseError;

/// Parse an expression table into a weight vector aligned to `set`.
///
/// Transcripts absent from the table keep weight 0.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read,
/// `ParseError::InvalidExpression` if the header or a value is malformed,
/// or `ParseError::UnknownName` for a transcript id not present in `set`.
pub fn read_expression(path: &Path, set: &SequenceSet) -> Result<Vec<f64>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_expression_text(&content, set)
}

/// Parse expression table text into a weight vector aligned to `set`.
pub fn parse_expression_text(text: &str, set: &SequenceSet) -> Result<Vec<f64>, ParseError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| ParseError::InvalidExpression("empty file".to_string()))?;
    let tpm_col = header
        .split('\t')
        .position(|name| name.trim() == "TPM")
        .ok_or_else(|| ParseError::InvalidExpression("no TPM column in header".to_string()))?;

    let mut tau = vec![0.0; set.len()];
    for (i, line) in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        let line_num = i + 1;
        if fields.len() <= tpm_col {
            return Err(ParseError::InvalidExpression(format!(
                "line {line_num} has fewer than {} fields",
                tpm_col + 1
            )));
        }

        let name = fields[0].trim();
        let idx = set
            .index_of(name)
            .ok_or_else(|| ParseError::UnknownName(name.to_string()))?;

        let tpm: f64 = fields[tpm_col].trim().parse().map_err(|_| {
            ParseError::InvalidExpression(format!(
                "invalid TPM on line {}: '{}'",
                line_num, fields[tpm_col]
            ))
        })?;
        tau[idx] = tpm / 1e6;
    }

    Ok(tau)
}
