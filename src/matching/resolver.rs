//! Greedy overlap resolver.
//!
//! Reduces a batch of possibly highly overlapping alignments against one
//! metric policy to a set of non-overlapping claims: no unit of any target
//! sequence is credited more than once, and each contested region goes to
//! the alignment holding the highest contribution at the moment it is
//! resolved. This is a greedy weighted set-packing approximation, not a
//! globally optimal assignment.
//!
//! The batch lives in an index-addressed arena; the priority queue and the
//! history lists hold integer handles, never references, so nothing is
//! invalidated as alignments shrink. Contribution seeding fans out across
//! threads (each computation touches only its own alignment plus read-only
//! shared arrays); the main loop is inherently sequential, since correctness
//! depends on a single global priority order and on replaying finalized
//! overlaps in true finalize order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;

use crate::core::alignment::TaggedAlignment;
use crate::core::segment::{intersects, subtract_in_place, Frame};
use crate::matching::policy::MetricPolicy;

/// Heap entry: max by contribution, ties won by the lower arena index.
///
/// Each handle is in the heap at most once, so entries are never stale.
struct HeapEntry {
    contribution: f64,
    handle: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.contribution
            .total_cmp(&other.contribution)
            .then_with(|| other.handle.cmp(&self.handle))
    }
}

/// Drives `policy` over one directional batch of alignments.
///
/// `source_card` and `target_card` are the sizes of the two sequence sets;
/// `min_aligned_len` is the admission threshold on an alignment's remaining
/// source-frame length (the read length).
///
/// The batch is consumed: the resolver holds the sole mutable copy for the
/// duration of the run and trims segments in place. Callers pass a fresh
/// value copy per metric.
pub fn resolve<P>(
    policy: &mut P,
    mut alignments: Vec<TaggedAlignment>,
    source_card: usize,
    target_card: usize,
    min_aligned_len: usize,
) where
    P: MetricPolicy + Sync,
{
    // Seed contributions. Independent per alignment, so fan out.
    let seed: &P = policy;
    alignments
        .par_iter_mut()
        .for_each(|l| l.contribution = seed.contribution(l));

    // Finalized alignments per source index and per target index, stamped
    // with an explicit finalize counter so the merge below replays them in
    // the exact order they were finalized.
    let mut finalized_by_source: Vec<Vec<(u64, usize)>> = vec![Vec::new(); source_card];
    let mut finalized_by_target: Vec<Vec<(u64, usize)>> = vec![Vec::new(); target_card];
    let mut next_stamp: u64 = 0;

    let mut queue: BinaryHeap<HeapEntry> = alignments
        .iter()
        .enumerate()
        .map(|(handle, l)| HeapEntry {
            contribution: l.contribution,
            handle,
        })
        .collect();

    while let Some(HeapEntry { handle, .. }) = queue.pop() {
        let (a_idx, b_idx) = (alignments[handle].a_idx, alignments[handle].b_idx);

        // Subtract every previously finalized alignment sharing a sequence
        // with this one, in true finalize order across both history lists.
        // The frame is implied by which list the entry came from.
        let mut segments = std::mem::take(&mut alignments[handle].segments);
        let mut changed = false;
        {
            let by_source = &finalized_by_source[a_idx];
            let by_target = &finalized_by_target[b_idx];
            let (mut i, mut j) = (0, 0);
            while i < by_source.len() || j < by_target.len() {
                let target_first = match (by_source.get(i), by_target.get(j)) {
                    (Some(&(s_stamp, _)), Some(&(t_stamp, _))) => t_stamp < s_stamp,
                    (None, Some(_)) => true,
                    _ => false,
                };
                let (frame, other) = if target_first {
                    j += 1;
                    (Frame::Target, by_target[j - 1].1)
                } else {
                    i += 1;
                    (Frame::Source, by_source[i - 1].1)
                };
                if intersects(frame, &segments, &alignments[other].segments) {
                    subtract_in_place(frame, &mut segments, &alignments[other].segments);
                    changed = true;
                }
            }
        }
        alignments[handle].segments = segments;

        if changed {
            // Shrunk: requeue with a fresh contribution, or drop for good if
            // what remains is below the admission threshold. Every change
            // strictly shrinks the covered region, so this terminates.
            if alignments[handle].meets_length_threshold(min_aligned_len) {
                alignments[handle].contribution = policy.contribution(&alignments[handle]);
                queue.push(HeapEntry {
                    contribution: alignments[handle].contribution,
                    handle,
                });
            }
        } else {
            // Unchallenged at the top of the queue: finalize.
            policy.commit(&alignments[handle]);
            finalized_by_source[a_idx].push((next_stamp, handle));
            finalized_by_target[b_idx].push((next_stamp, handle));
            next_stamp += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segment::AlignmentSegment;
    use crate::matching::policy::PositionPolicy;

    fn seg(a: (usize, usize), b: (usize, usize)) -> AlignmentSegment {
        AlignmentSegment {
            a_start: a.0,
            a_end: a.1,
            b_start: b.0,
            b_end: b.1,
            a_mismatches: Vec::new(),
            b_mismatches: Vec::new(),
        }
    }

    /// Policy wrapper recording the order and contributions of commits.
    struct Recording<'a> {
        inner: PositionPolicy<'a>,
        committed: Vec<(usize, usize, f64)>,
    }

    impl MetricPolicy for Recording<'_> {
        fn contribution(&self, aln: &TaggedAlignment) -> f64 {
            self.inner.contribution(aln)
        }
        fn commit(&mut self, aln: &TaggedAlignment) {
            self.committed.push((aln.a_idx, aln.b_idx, aln.contribution));
            self.inner.commit(aln);
        }
        fn recall(&self) -> f64 {
            self.inner.recall()
        }
    }

    #[test]
    fn test_disjoint_alignments_all_finalize_unchanged() {
        let lengths = vec![100];
        let tau = vec![1.0];
        let alignments = vec![
            TaggedAlignment::new(0, 0, vec![seg((0, 9), (0, 9))]),
            TaggedAlignment::new(1, 0, vec![seg((0, 9), (20, 29))]),
            TaggedAlignment::new(2, 0, vec![seg((0, 9), (40, 49))]),
        ];
        let mut policy = Recording {
            inner: PositionPolicy::new(&lengths, &tau),
            committed: Vec::new(),
        };
        resolve(&mut policy, alignments, 3, 1, 5);
        assert_eq!(policy.committed.len(), 3);
        // Each finalized exactly once with its seeded contribution intact.
        for &(_, _, c) in &policy.committed {
            assert_eq!(c, 10.0);
        }
        assert!((policy.recall() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_strict_dominance_discards_loser() {
        // Same target region; the larger alignment wins it all and the
        // smaller one shrinks to nothing and is discarded.
        let lengths = vec![100];
        let tau = vec![1.0];
        let alignments = vec![
            TaggedAlignment::new(0, 0, vec![seg((0, 9), (10, 19))]),
            TaggedAlignment::new(1, 0, vec![seg((0, 3), (12, 15))]),
        ];
        let mut policy = Recording {
            inner: PositionPolicy::new(&lengths, &tau),
            committed: Vec::new(),
        };
        resolve(&mut policy, alignments, 2, 1, 2);
        assert_eq!(policy.committed, vec![(0, 0, 10.0)]);
        assert!((policy.recall() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_loser_keeps_leftover_region() {
        // Alignments overlap on target [10, 19]; the loser is trimmed to its
        // non-contested remainder and finalized with the reduced value.
        let lengths = vec![100];
        let tau = vec![1.0];
        let alignments = vec![
            TaggedAlignment::new(0, 0, vec![seg((0, 14), (5, 19))]),
            TaggedAlignment::new(1, 0, vec![seg((0, 14), (10, 24))]),
        ];
        let mut policy = Recording {
            inner: PositionPolicy::new(&lengths, &tau),
            committed: Vec::new(),
        };
        resolve(&mut policy, alignments, 2, 1, 3);
        assert_eq!(policy.committed.len(), 2);
        // Tie on seeded contribution: handle 0 pops first and is finalized
        // whole; handle 1 keeps target [20, 24].
        assert_eq!(policy.committed[0], (0, 0, 15.0));
        assert_eq!(policy.committed[1], (1, 0, 5.0));
        // 20 distinct target positions claimed in total, each exactly once.
        assert!((policy.recall() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_tie_break_is_stable_low_index_first() {
        let lengths = vec![50];
        let tau = vec![1.0];
        // Three identical alignments; only the first can win.
        let alignments = vec![
            TaggedAlignment::new(0, 0, vec![seg((0, 9), (0, 9))]),
            TaggedAlignment::new(1, 0, vec![seg((0, 9), (0, 9))]),
            TaggedAlignment::new(2, 0, vec![seg((0, 9), (0, 9))]),
        ];
        let mut policy = Recording {
            inner: PositionPolicy::new(&lengths, &tau),
            committed: Vec::new(),
        };
        resolve(&mut policy, alignments, 3, 1, 1);
        assert_eq!(policy.committed, vec![(0, 0, 10.0)]);
    }

    #[test]
    fn test_source_frame_subtraction_applies() {
        // Two alignments from the same source sequence to different targets:
        // the source-frame history must trim the second one.
        let lengths = vec![50, 50];
        let tau = vec![0.5, 0.5];
        let alignments = vec![
            TaggedAlignment::new(0, 0, vec![seg((0, 19), (0, 19))]),
            TaggedAlignment::new(0, 1, vec![seg((10, 24), (10, 24))]),
        ];
        let mut policy = Recording {
            inner: PositionPolicy::new(&lengths, &tau),
            committed: Vec::new(),
        };
        resolve(&mut policy, alignments, 1, 2, 5);
        assert_eq!(policy.committed.len(), 2);
        assert_eq!(policy.committed[0], (0, 0, 10.0));
        // Second alignment lost source [10, 19], keeping 5 target positions.
        assert_eq!(policy.committed[1], (0, 1, 2.5));
    }

    #[test]
    fn test_empty_batch() {
        let lengths = vec![10];
        let tau = vec![1.0];
        let mut policy = PositionPolicy::new(&lengths, &tau);
        resolve(&mut policy, Vec::new(), 4, 1, 1);
        assert_eq!(policy.recall(), 0.0);
    }
}
