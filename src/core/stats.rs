//! Result tuples and the F1 combination rule.

use serde::Serialize;

/// One precision or recall value per accounting scheme.
///
/// Field names follow the report vocabulary: `pair` counts position pairs,
/// `kpair` spaced pairs at distance k-1, `kmer` length-k windows, `nucl`
/// single nucleotides, and `tran` whole transcripts recovered nearly in
/// full. Every component lies in [0, 1] for well-formed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsTuple {
    pub pair: f64,
    pub kpair: f64,
    pub kmer: f64,
    pub nucl: f64,
    pub tran: f64,
}

/// Harmonic mean of precision and recall, with `f1(0, 0) = 0`.
#[must_use]
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision == 0.0 && recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Component-wise F1 of a precision tuple and a recall tuple.
#[must_use]
pub fn f1_tuple(precision: &StatsTuple, recall: &StatsTuple) -> StatsTuple {
    StatsTuple {
        pair: f1(precision.pair, recall.pair),
        kpair: f1(precision.kpair, recall.kpair),
        kmer: f1(precision.kmer, recall.kmer),
        nucl: f1(precision.nucl, recall.nucl),
        tran: f1(precision.tran, recall.tran),
    }
}

/// Precision/recall/F1 under one weighting scheme.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredStats {
    pub precision: StatsTuple,
    pub recall: StatsTuple,
    pub f1: StatsTuple,
}

impl ScoredStats {
    pub fn new(precision: StatsTuple, recall: StatsTuple) -> Self {
        let f1 = f1_tuple(&precision, &recall);
        Self {
            precision,
            recall,
            f1,
        }
    }
}

/// The full result of one evaluation, serializable for `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct EvalSummary {
    /// Present only when expression files were supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted: Option<ScoredStats>,
    pub unweighted: ScoredStats,
}
