//! Redundant mechanism detection over GF(2).
//!
//! Each symptom is a bit vector over `num_detectors + num_observables`
//! coordinates: detector `d` at column `d`, observable `i` at column
//! `num_detectors + i`. A mechanism is redundant when its vector lies in the
//! span of the vectors of the mechanisms before it, i.e. it can be written as
//! the XOR of earlier symptoms.
//!
//! Rows are packed `u64` words. The basis is kept in echelon form keyed by
//! pivot (lowest set column), so reducing a vector only ever clears its
//! lowest bit and moves upward; reduction is exact, with no tolerance.
//!
//! A stored row keeps only the words from its pivot to its highest set
//! column. Detector error models from circuits have local symptoms, so
//! basis rows stay short and memory grows roughly linearly with rank. The
//! worst case (rows spanning the whole coordinate space) is still
//! `width^2 / 16` bytes at full rank, about 625 MB for 1e5 columns.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::bits::{lowest_set_bit, toggle, words_for};
use crate::model::types::{ErrorModel, Symptom};

/// Incremental GF(2) row basis.
#[derive(Clone, Debug)]
pub struct Gf2Basis {
    num_detectors: usize,
    width: usize,
    /// `rows[c]` is the basis row whose lowest set column is `c`.
    rows: Vec<Option<BasisRow>>,
    rank: usize,
}

/// A basis row trimmed to the words between its pivot and its last set bit.
#[derive(Clone, Debug)]
struct BasisRow {
    first_word: usize,
    words: Box<[u64]>,
}

impl BasisRow {
    fn trimmed(row: &[u64], pivot: usize) -> Self {
        let first_word = pivot / 64;
        let last_word = row.iter().rposition(|&w| w != 0).unwrap_or(first_word);
        Self {
            first_word,
            words: row[first_word..=last_word].into(),
        }
    }
}

impl Gf2Basis {
    /// Creates an empty basis over the given coordinate space.
    #[must_use]
    pub fn new(num_detectors: u32, num_observables: u32) -> Self {
        let width = num_detectors as usize + num_observables as usize;
        Self {
            num_detectors: num_detectors as usize,
            width,
            rows: vec![None; width],
            rank: 0,
        }
    }

    /// Dimension of the span so far.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Packs a symptom into a row.
    fn encode(&self, symptom: &Symptom) -> Box<[u64]> {
        let mut row = vec![0u64; words_for(self.width)].into_boxed_slice();
        for &d in symptom.detectors() {
            toggle(&mut row, d as usize);
        }
        let mut mask = symptom.observables();
        while mask != 0 {
            toggle(&mut row, self.num_detectors + mask.trailing_zeros() as usize);
            mask &= mask - 1;
        }
        row
    }

    /// Reduces `symptom` against the basis.
    ///
    /// Returns `true` and grows the basis if the symptom is independent;
    /// returns `false` if it already lies in the span.
    pub fn insert(&mut self, symptom: &Symptom) -> bool {
        let mut row = self.encode(symptom);
        while let Some(pivot) = lowest_set_bit(&row) {
            match &self.rows[pivot] {
                Some(basis_row) => {
                    for (w, b) in row[basis_row.first_word..]
                        .iter_mut()
                        .zip(basis_row.words.iter())
                    {
                        *w ^= b;
                    }
                }
                None => {
                    self.rows[pivot] = Some(BasisRow::trimmed(&row, pivot));
                    self.rank += 1;
                    return true;
                }
            }
        }
        false
    }
}

/// Indices of mechanisms whose symptom is a GF(2) combination of the
/// symptoms of earlier mechanisms.
///
/// Detection is order-dependent: the first of two dependent mechanisms is
/// kept, later ones are reported. A mechanism with an empty symptom is
/// always redundant.
#[must_use]
pub fn find_redundant_errors(model: &ErrorModel) -> BTreeSet<usize> {
    let mut basis = Gf2Basis::new(model.num_detectors(), model.num_observables());
    let redundant: BTreeSet<usize> = model
        .mechanisms()
        .iter()
        .enumerate()
        .filter(|(_, m)| !basis.insert(&m.symptom))
        .map(|(i, _)| i)
        .collect();

    debug!(
        mechanisms = model.len(),
        redundant = redundant.len(),
        rank = basis.rank(),
        "redundancy analysis complete"
    );
    redundant
}

/// Summary reported by the batch statistics driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DemStats {
    /// Mechanisms in the analysed model.
    pub total_mechanisms: usize,
    /// Mechanisms flagged by [`find_redundant_errors`].
    pub redundant_mechanisms: usize,
}

impl fmt::Display for DemStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} errors are redundant",
            self.redundant_mechanisms, self.total_mechanisms
        )
    }
}

/// Counts mechanisms and redundant mechanisms of `model` as given.
///
/// Merging and pruning are the caller's choice and happen before this call.
#[must_use]
pub fn dem_stats(model: &ErrorModel) -> DemStats {
    DemStats {
        total_mechanisms: model.len(),
        redundant_mechanisms: find_redundant_errors(model).len(),
    }
}
