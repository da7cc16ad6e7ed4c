//! Detector to mechanism adjacency.
//!
//! Stored in compressed-row form: the mechanisms touching detector `d` are
//! `mechanisms[offsets[d]..offsets[d + 1]]`, in ascending mechanism order.
//! One contiguous allocation keeps candidate enumeration in the search loop
//! cache-friendly.

use crate::model::types::ErrorModel;

/// Read-only map from each detector to the mechanisms that flip it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyndromeIndex {
    offsets: Vec<u32>,
    mechanisms: Vec<u32>,
}

impl SyndromeIndex {
    /// Builds the index in O(total detector occurrences).
    #[must_use]
    pub fn new(model: &ErrorModel) -> Self {
        let num_detectors = model.num_detectors() as usize;

        let mut offsets = vec![0u32; num_detectors + 1];
        for m in model.mechanisms() {
            for &d in m.detectors() {
                offsets[d as usize + 1] += 1;
            }
        }
        for d in 0..num_detectors {
            offsets[d + 1] += offsets[d];
        }

        let mut cursor: Vec<u32> = offsets[..num_detectors].to_vec();
        let mut mechanisms = vec![0u32; offsets[num_detectors] as usize];
        for (i, m) in model.mechanisms().iter().enumerate() {
            for &d in m.detectors() {
                let slot = &mut cursor[d as usize];
                mechanisms[*slot as usize] = i as u32;
                *slot += 1;
            }
        }

        Self {
            offsets,
            mechanisms,
        }
    }

    /// Number of detectors covered.
    #[inline]
    #[must_use]
    pub fn num_detectors(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Mechanisms flipping `detector`, ascending.
    #[inline]
    #[must_use]
    pub fn mechanisms_for(&self, detector: u32) -> &[u32] {
        let d = detector as usize;
        &self.mechanisms[self.offsets[d] as usize..self.offsets[d + 1] as usize]
    }

    /// Number of mechanisms flipping `detector`.
    #[inline]
    #[must_use]
    pub fn degree(&self, detector: u32) -> usize {
        self.mechanisms_for(detector).len()
    }

    /// Returns true if no mechanism can flip `detector`.
    #[inline]
    #[must_use]
    pub fn is_isolated(&self, detector: u32) -> bool {
        self.degree(detector) == 0
    }

    /// Total detector occurrences across all mechanisms.
    #[inline]
    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.mechanisms.len()
    }
}
