//! Runs the resolver once per metric and assembles the statistics tuples.

use crate::core::alignment::TaggedAlignment;
use crate::core::stats::{ScoredStats, StatsTuple};
use crate::matching::policy::{
    MetricPolicy, PairPolicy, PositionPolicy, SpacedPairPolicy, WholeSeqPolicy, WindowPolicy,
};
use crate::matching::resolver::resolve;

/// Everything one directional run produces.
pub struct DirectionResult {
    pub stats: StatsTuple,
    /// Per-target fractional coverage from the whole-sequence metric, in
    /// target index order.
    pub coverage_fractions: Vec<f64>,
}

/// Resolves one directional batch under all five metrics.
///
/// Each metric gets its own policy and a private value copy of the batch;
/// the five runs share nothing mutable. `readlen` doubles as the window /
/// spaced-pair parameter k and as the admission threshold.
pub fn evaluate_direction(
    alignments: &[TaggedAlignment],
    source_card: usize,
    target_lengths: &[usize],
    target_tau: &[f64],
    readlen: usize,
) -> DirectionResult {
    let target_card = target_lengths.len();

    let pair = {
        let mut policy = PairPolicy::new(target_lengths, target_tau);
        resolve(&mut policy, alignments.to_vec(), source_card, target_card, readlen);
        policy.recall()
    };

    let kpair = {
        let mut policy = SpacedPairPolicy::new(readlen, target_lengths, target_tau);
        resolve(&mut policy, alignments.to_vec(), source_card, target_card, readlen);
        policy.recall()
    };

    let kmer = {
        let mut policy = WindowPolicy::new(readlen, target_lengths, target_tau);
        resolve(&mut policy, alignments.to_vec(), source_card, target_card, readlen);
        policy.recall()
    };

    let nucl = {
        let mut policy = PositionPolicy::new(target_lengths, target_tau);
        resolve(&mut policy, alignments.to_vec(), source_card, target_card, readlen);
        policy.recall()
    };

    let (tran, coverage_fractions) = {
        let mut policy = WholeSeqPolicy::new(target_lengths, target_tau);
        resolve(&mut policy, alignments.to_vec(), source_card, target_card, readlen);
        (policy.recall(), policy.coverage_fractions())
    };

    DirectionResult {
        stats: StatsTuple {
            pair,
            kpair,
            kmer,
            nucl,
            tran,
        },
        coverage_fractions,
    }
}

/// One full evaluation under one weighting scheme: recall from the A→B
/// batch weighted by tau_B, precision from the B→A batch weighted by tau_A.
///
/// Returns the scored tuple plus the reference-side coverage fractions from
/// the recall run (the plot sink consumes these for the unweighted scheme).
pub fn evaluate_weighting(
    a_to_b: &[TaggedAlignment],
    b_to_a: &[TaggedAlignment],
    a_lengths: &[usize],
    b_lengths: &[usize],
    tau_a: &[f64],
    tau_b: &[f64],
    readlen: usize,
) -> (ScoredStats, Vec<f64>) {
    let recall = evaluate_direction(a_to_b, a_lengths.len(), b_lengths, tau_b, readlen);
    let precision = evaluate_direction(b_to_a, b_lengths.len(), a_lengths, tau_a, readlen);
    (
        ScoredStats::new(precision.stats, recall.stats),
        recall.coverage_fractions,
    )
}
