//! An indexed collection of named sequences.

use std::collections::HashMap;

/// One side of the evaluation: the assembly ("A") or the reference ("B").
///
/// Sequences are addressed by index everywhere downstream of parsing; the
/// name map exists so alignment records, which refer to sequences by name,
/// can be resolved once on input.
#[derive(Debug, Clone)]
pub struct SequenceSet {
    pub names: Vec<String>,
    /// Raw sequence bytes, parallel to `names`.
    pub seqs: Vec<Vec<u8>>,
    /// Sequence lengths, parallel to `names`.
    pub lengths: Vec<usize>,
    name_to_idx: HashMap<String, usize>,
}

impl SequenceSet {
    /// Build a set from parallel name and sequence lists.
    ///
    /// Callers are responsible for rejecting duplicate names first; on a
    /// duplicate the later entry wins the name lookup.
    pub fn new(names: Vec<String>, seqs: Vec<Vec<u8>>) -> Self {
        debug_assert_eq!(names.len(), seqs.len());
        let lengths = seqs.iter().map(Vec::len).collect();
        let name_to_idx = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self {
            names,
            seqs,
            lengths,
            name_to_idx,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_idx.get(name).copied()
    }

    /// The uniform weight vector `1/N`, used for the unweighted run.
    #[allow(clippy::cast_precision_loss)]
    pub fn uniform_weights(&self) -> Vec<f64> {
        let n = self.len();
        vec![1.0 / n as f64; n]
    }
}
