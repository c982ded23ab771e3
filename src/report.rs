//! Report and plot sinks.
//!
//! The report is machine-readable `label<TAB>value` lines, fifteen per
//! weighting scheme: precision, recall and F1 for each of the five metrics.
//! The plot file carries one fractional-coverage value per reference
//! sequence per line, in sequence index order.

use std::io::{self, Write};

use crate::core::stats::ScoredStats;

/// Writes one weighting scheme's scores under `prefix` (e.g. `weighted`).
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_stats<W: Write>(out: &mut W, prefix: &str, scored: &ScoredStats) -> io::Result<()> {
    let metrics = [
        ("pair", scored.precision.pair, scored.recall.pair, scored.f1.pair),
        ("kpair", scored.precision.kpair, scored.recall.kpair, scored.f1.kpair),
        ("kmer", scored.precision.kmer, scored.recall.kmer, scored.f1.kmer),
        ("nucl", scored.precision.nucl, scored.recall.nucl, scored.f1.nucl),
        ("tran", scored.precision.tran, scored.recall.tran, scored.f1.tran),
    ];
    for (name, precision, recall, f1) in metrics {
        writeln!(out, "{prefix}_{name}_precision\t{precision}")?;
        writeln!(out, "{prefix}_{name}_recall\t{recall}")?;
        writeln!(out, "{prefix}_{name}_F1\t{f1}")?;
    }
    Ok(())
}

/// Writes the per-reference coverage fractions, one per line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_plot<W: Write>(out: &mut W, fractions: &[f64]) -> io::Result<()> {
    for value in fractions {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
