//! Detector error model types.
//!
//! A detector error model (DEM) lists independent error mechanisms. Each
//! mechanism fires with some probability and, when it does, flips a fixed
//! set of detectors and logical observables:
//!
//! ```text
//! error(0.001) D0 D1
//! error(0.002) D0 L0
//! ```
//!
//! - **Detectors** are parity checks, indexed `0..num_detectors`.
//! - **Observables** are logical parities, indexed `0..num_observables` with
//!   at most [`MAX_OBSERVABLES`] of them, so a set of flipped observables is a
//!   single `u64` mask.
//! - A **symptom** is what a mechanism (or a combination of mechanisms)
//!   looks like from outside: a sorted, duplicate-free detector list plus an
//!   observable mask. Symptoms compose by XOR.

use crate::error::{ModelError, ModelResult};
use crate::inline_vec::InlineVec;

/// Observable masks are one `u64` wide.
pub const MAX_OBSERVABLES: u32 = 64;

/// Detectors stored inline per symptom before spilling to the heap.
///
/// Circuit-level models rarely have mechanisms touching more than a handful
/// of detectors.
pub const INLINE_DETECTORS: usize = 8;

/// Detector list of a symptom.
pub type DetectorList = InlineVec<u32, INLINE_DETECTORS>;

/// One target of a raw `error(...)` instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Detector flipped by the mechanism.
    Detector(u32),
    /// Logical observable flipped by the mechanism.
    Observable(u32),
    /// `^` separator between decomposed components. Carries no meaning for
    /// the combined symptom.
    Separator,
}

impl Target {
    /// Check if this target is a detector.
    #[must_use]
    pub const fn is_detector(&self) -> bool {
        matches!(self, Target::Detector(_))
    }

    /// Check if this target is a logical observable.
    #[must_use]
    pub const fn is_observable(&self) -> bool {
        matches!(self, Target::Observable(_))
    }

    /// Get detector ID if this is a detector target.
    #[must_use]
    pub const fn detector_id(&self) -> Option<u32> {
        match self {
            Target::Detector(id) => Some(*id),
            _ => None,
        }
    }

    /// Get observable ID if this is an observable target.
    #[must_use]
    pub const fn observable_id(&self) -> Option<u32> {
        match self {
            Target::Observable(id) => Some(*id),
            _ => None,
        }
    }
}

/// Net effect of one or more combined mechanisms.
///
/// Invariant: `detectors` is strictly increasing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Symptom {
    detectors: DetectorList,
    observables: u64,
}

impl Symptom {
    /// Builds a symptom, XOR-reducing the detector list.
    ///
    /// A detector listed an even number of times cancels out.
    #[must_use]
    pub fn new(detectors: impl IntoIterator<Item = u32>, observables: u64) -> Self {
        let mut dets: DetectorList = detectors.into_iter().collect();
        dets.sort_unstable();
        Self {
            detectors: cancel_pairs(&dets),
            observables,
        }
    }

    /// Builds a symptom from raw instruction targets.
    ///
    /// Repeated detectors and observables cancel; separators are ignored.
    /// Observable ids at or above [`MAX_OBSERVABLES`] are rejected.
    pub fn from_targets(targets: &[Target]) -> ModelResult<Self> {
        let mut observables = 0u64;
        let mut dets = DetectorList::new();
        for target in targets {
            match *target {
                Target::Detector(d) => dets.push(d),
                Target::Observable(o) => {
                    if o >= MAX_OBSERVABLES {
                        return Err(ModelError::ObservableOutOfRange {
                            observable: o,
                            num_observables: MAX_OBSERVABLES,
                        });
                    }
                    observables ^= 1u64 << o;
                }
                Target::Separator => {}
            }
        }
        Ok(Self::new(dets.iter().copied(), observables))
    }

    /// Sorted detector indices.
    #[inline]
    #[must_use]
    pub fn detectors(&self) -> &[u32] {
        &self.detectors
    }

    /// Observable mask (bit `i` = observable `i` flipped).
    #[inline]
    #[must_use]
    pub const fn observables(&self) -> u64 {
        self.observables
    }

    /// Returns true if the symptom flips nothing at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty() && self.observables == 0
    }

    /// Returns true if `detector` is part of the symptom.
    #[inline]
    #[must_use]
    pub fn touches(&self, detector: u32) -> bool {
        self.detectors.binary_search(&detector).is_ok()
    }

    /// Combines two symptoms: symmetric difference of detectors, XOR of
    /// observables.
    #[must_use]
    pub fn xor(&self, other: &Symptom) -> Symptom {
        Symptom {
            detectors: symmetric_difference(&self.detectors, &other.detectors),
            observables: self.observables ^ other.observables,
        }
    }

    /// Iterates the symptom as instruction targets, detectors first.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        let dets = self.detectors.iter().map(|&d| Target::Detector(d));
        let mut mask = self.observables;
        let obs = core::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let o = mask.trailing_zeros();
            mask &= mask - 1;
            Some(Target::Observable(o))
        });
        dets.chain(obs)
    }
}

/// Merges two sorted, duplicate-free slices into their symmetric difference.
pub(crate) fn symmetric_difference<const N: usize>(a: &[u32], b: &[u32]) -> InlineVec<u32, N> {
    let mut out = InlineVec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            core::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            core::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            core::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Drops every value that occurs an even number of times in a sorted slice.
fn cancel_pairs(sorted: &[u32]) -> DetectorList {
    let mut out = DetectorList::new();
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        if (j - i) % 2 == 1 {
            out.push(sorted[i]);
        }
        i = j;
    }
    out
}

/// A weighted error mechanism.
///
/// In hypergraph terms, a mechanism is a hyperedge whose endpoints are its
/// detectors, with weight [`cost`](Self::cost) and a frame change given by
/// its observable mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Mechanism {
    /// Probability that the mechanism fires. Zero marks a degenerate
    /// mechanism that must be removed before decoding.
    pub probability: f64,
    /// What the mechanism flips.
    pub symptom: Symptom,
}

impl Mechanism {
    /// Create a new error mechanism.
    #[must_use]
    pub const fn new(probability: f64, symptom: Symptom) -> Self {
        Self {
            probability,
            symptom,
        }
    }

    /// Log-likelihood-ratio weight `-ln(p / (1 - p))`.
    ///
    /// Minimizing the summed cost of a set of independent mechanisms
    /// maximizes its joint likelihood. `+inf` for `p = 0`, zero for
    /// `p = 0.5`.
    #[inline]
    #[must_use]
    pub fn cost(&self) -> f64 {
        -(self.probability / (1.0 - self.probability)).ln()
    }

    /// Detectors flipped by this mechanism.
    #[inline]
    #[must_use]
    pub fn detectors(&self) -> &[u32] {
        self.symptom.detectors()
    }

    /// Observable mask flipped by this mechanism.
    #[inline]
    #[must_use]
    pub const fn observables(&self) -> u64 {
        self.symptom.observables()
    }

    /// Check if this error affects any logical observables.
    #[must_use]
    pub const fn has_frame_changes(&self) -> bool {
        self.symptom.observables() != 0
    }

    /// Check if this is a boundary error (affects only 1 detector).
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.detectors().len() == 1
    }

    /// Check if this is a standard edge error (affects exactly 2 detectors).
    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.detectors().len() == 2
    }

    /// Check if this is a hyperedge error (affects >2 detectors).
    #[must_use]
    pub fn is_hyperedge(&self) -> bool {
        self.detectors().len() > 2
    }
}

/// An ordered collection of mechanisms over a fixed detector and observable
/// space.
///
/// Invariants, checked by [`ErrorModel::new`]:
/// - every detector index is `< num_detectors`,
/// - every observable bit is `< num_observables <= 64`,
/// - every probability is finite and within `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorModel {
    num_detectors: u32,
    num_observables: u32,
    mechanisms: Vec<Mechanism>,
}

impl ErrorModel {
    /// Builds a model, validating every mechanism against the declared
    /// detector and observable counts.
    pub fn new(
        num_detectors: u32,
        num_observables: u32,
        mechanisms: Vec<Mechanism>,
    ) -> ModelResult<Self> {
        if num_observables > MAX_OBSERVABLES {
            return Err(ModelError::TooManyObservables(num_observables));
        }
        for (index, m) in mechanisms.iter().enumerate() {
            if !(0.0..=1.0).contains(&m.probability) {
                return Err(ModelError::InvalidProbability {
                    index,
                    probability: m.probability,
                    expected: "a value in [0, 1]",
                });
            }
            if let Some(&detector) = m.detectors().last() {
                if detector >= num_detectors {
                    return Err(ModelError::DetectorOutOfRange {
                        detector,
                        num_detectors,
                    });
                }
            }
            let stray = m.observables() & !observable_range_mask(num_observables);
            if stray != 0 {
                return Err(ModelError::ObservableOutOfRange {
                    observable: stray.trailing_zeros(),
                    num_observables,
                });
            }
        }
        Ok(Self {
            num_detectors,
            num_observables,
            mechanisms,
        })
    }

    /// Rebuilds a model from mechanisms already known to satisfy the
    /// invariants of `template`.
    pub(crate) fn derived(template: &ErrorModel, mechanisms: Vec<Mechanism>) -> Self {
        Self {
            num_detectors: template.num_detectors,
            num_observables: template.num_observables,
            mechanisms,
        }
    }

    /// Total number of detectors.
    #[inline]
    #[must_use]
    pub const fn num_detectors(&self) -> u32 {
        self.num_detectors
    }

    /// Number of logical observables.
    #[inline]
    #[must_use]
    pub const fn num_observables(&self) -> u32 {
        self.num_observables
    }

    /// Mechanisms in model order.
    #[inline]
    #[must_use]
    pub fn mechanisms(&self) -> &[Mechanism] {
        &self.mechanisms
    }

    /// Number of mechanisms.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mechanisms.len()
    }

    /// Returns true if the model has no mechanisms.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mechanisms.is_empty()
    }

    /// Consumes the model, returning its mechanisms.
    #[must_use]
    pub fn into_mechanisms(self) -> Vec<Mechanism> {
        self.mechanisms
    }

    /// Get number of 64-bit words needed for syndrome storage.
    #[must_use]
    pub const fn syndrome_words(&self) -> usize {
        (self.num_detectors as usize).div_ceil(64)
    }

    /// Number of mechanisms with probability exactly zero.
    #[must_use]
    pub fn count_zero_probability(&self) -> usize {
        self.mechanisms
            .iter()
            .filter(|m| m.probability == 0.0)
            .count()
    }

    /// Check if the DEM has any hyperedges (errors affecting >2 detectors).
    #[must_use]
    pub fn has_hyperedges(&self) -> bool {
        self.mechanisms.iter().any(Mechanism::is_hyperedge)
    }

    /// Count boundary errors (errors affecting only 1 detector).
    #[must_use]
    pub fn count_boundary_mechanisms(&self) -> usize {
        self.mechanisms.iter().filter(|m| m.is_boundary()).count()
    }

    /// Count standard edge errors (errors affecting exactly 2 detectors).
    #[must_use]
    pub fn count_edge_mechanisms(&self) -> usize {
        self.mechanisms.iter().filter(|m| m.is_edge()).count()
    }
}

/// Mask with the low `num_observables` bits set.
#[inline]
pub(crate) const fn observable_range_mask(num_observables: u32) -> u64 {
    if num_observables >= 64 {
        u64::MAX
    } else {
        (1u64 << num_observables) - 1
    }
}
