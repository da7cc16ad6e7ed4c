//! Best-first search decoder.
//!
//! Finds a minimum-cost set of mechanisms whose combined detectors equal the
//! observed syndrome, and reports the XOR of their observable masks.
//!
//! # Search
//!
//! A state is the *residual* syndrome still to be explained, together with the
//! accumulated cost and observable mask of the mechanisms chosen so far. From
//! a state with residual `R`, only mechanisms touching the lowest detector of
//! `R` are tried: every explanation of `R` must flip that detector an odd
//! number of times, so nothing optimal is lost, and the branching factor is
//! bounded by the detector's degree.
//!
//! States leave the frontier in order of `cost + h(R)` where `h` is a
//! consistent lower bound (see [`Heuristic`]). With non-negative costs this
//! makes the first empty residual popped a global optimum, and makes it safe
//! to close a residual the first time it is popped.
//!
//! Ties are broken by push order. Children are pushed in ascending mechanism
//! order and detections are sorted before the search starts, so results are
//! reproducible and independent of detection order.
//!
//! # Failure
//!
//! - [`DecodeError::NoExplanation`] when the frontier runs dry, or up front
//!   when a detection can be flipped by no mechanism at all.
//! - [`DecodeError::BudgetExceeded`] when the expansion or wall-clock limit
//!   of [`SearchConfig`] is hit first.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::bits::for_each_set_bit;
use crate::decoder::builder::{Heuristic, SearchConfig};
use crate::decoder::index::SyndromeIndex;
use crate::error::{DecodeError, DecodeResult, ModelError, ModelResult};
use crate::inline_vec::InlineVec;
use crate::model::types::{symmetric_difference, ErrorModel};

/// Residual detectors stored inline per frontier entry.
pub const INLINE_RESIDUAL: usize = 16;

/// Residual syndrome of a search state, strictly increasing.
pub type Residual = InlineVec<u32, INLINE_RESIDUAL>;

/// Expansions between wall-clock checks.
const CLOCK_CHECK_INTERVAL: usize = 64;

/// Marks the root in the parent chain.
const NO_PARENT: u32 = u32::MAX;

/// A minimum-cost explanation of a syndrome.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoding {
    /// Chosen mechanism indices, ascending.
    pub mechanisms: Vec<usize>,
    /// XOR of the chosen mechanisms' observable masks.
    pub observables: u64,
    /// Summed cost of the chosen mechanisms.
    pub cost: f64,
    /// States expanded to find it.
    pub explored: usize,
}

/// Decoder over an immutable, canonical error model.
///
/// Construction is done once; [`decode`](Self::decode) is then called per
/// syndrome. All per-call state lives on the caller's stack or in
/// allocations local to the call, so a single decoder can be shared across
/// threads.
#[derive(Clone, Debug)]
pub struct SearchDecoder {
    model: ErrorModel,
    index: SyndromeIndex,
    costs: Vec<f64>,
    /// Cheapest `cost(m) / |detectors(m)|` over mechanisms touching each
    /// detector; `+inf` for isolated detectors.
    detector_share: Vec<f64>,
    /// Cheapest `cost(m)` over mechanisms touching each detector.
    detector_min: Vec<f64>,
    config: SearchConfig,
}

/// Parent-chain record for path reconstruction.
#[derive(Clone, Copy)]
struct Step {
    parent: u32,
    mechanism: u32,
}

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest priority
/// first, earliest push among equals.
struct Frontier {
    priority: f64,
    cost: f64,
    seq: u64,
    step: u32,
    observables: u64,
    residual: Residual,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl SearchDecoder {
    /// Builds a decoder with the default [`SearchConfig`].
    ///
    /// # Errors
    ///
    /// See [`with_config`](Self::with_config).
    pub fn new(model: ErrorModel) -> ModelResult<Self> {
        Self::with_config(model, SearchConfig::default())
    }

    /// Builds a decoder with an explicit configuration.
    ///
    /// The model should be canonical (see [`canonicalize`](crate::canonicalize)).
    ///
    /// # Errors
    ///
    /// - [`ModelError::ZeroProbability`] if any mechanism has probability 0.
    /// - [`ModelError::InvalidProbability`] if any probability exceeds 0.5;
    ///   such mechanisms have negative cost, which no admissible bound can
    ///   account for.
    pub fn with_config(model: ErrorModel, config: SearchConfig) -> ModelResult<Self> {
        for (index, m) in model.mechanisms().iter().enumerate() {
            if m.probability == 0.0 {
                return Err(ModelError::ZeroProbability { index });
            }
            if m.probability > 0.5 {
                return Err(ModelError::InvalidProbability {
                    index,
                    probability: m.probability,
                    expected: "a value in (0, 0.5]",
                });
            }
        }

        let index = SyndromeIndex::new(&model);
        let costs: Vec<f64> = model.mechanisms().iter().map(|m| m.cost()).collect();

        let num_detectors = model.num_detectors() as usize;
        let mut detector_share = vec![f64::INFINITY; num_detectors];
        let mut detector_min = vec![f64::INFINITY; num_detectors];
        for (m, &cost) in model.mechanisms().iter().zip(&costs) {
            let share = cost / m.detectors().len() as f64;
            for &d in m.detectors() {
                let d = d as usize;
                detector_share[d] = detector_share[d].min(share);
                detector_min[d] = detector_min[d].min(cost);
            }
        }

        debug!(
            mechanisms = model.len(),
            detectors = model.num_detectors(),
            observables = model.num_observables(),
            adjacency = index.num_entries(),
            "built search decoder"
        );

        Ok(Self {
            model,
            index,
            costs,
            detector_share,
            detector_min,
            config,
        })
    }

    /// The model being decoded against.
    #[must_use]
    pub fn model(&self) -> &ErrorModel {
        &self.model
    }

    /// Detector adjacency built from the model.
    #[must_use]
    pub fn index(&self) -> &SyndromeIndex {
        &self.index
    }

    /// Active search configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Per-mechanism costs, in model order.
    #[must_use]
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Predicts the observable flips for a syndrome.
    ///
    /// `detections` lists fired detectors in any order. A detector listed
    /// twice cancels out.
    ///
    /// # Errors
    ///
    /// See [`decode_to_errors`](Self::decode_to_errors).
    pub fn decode(&self, detections: &[u64]) -> DecodeResult<u64> {
        self.decode_to_errors(detections).map(|d| d.observables)
    }

    /// Predicts the observable flips for a bit-packed syndrome.
    ///
    /// Bit `i` of word `w` is detector `64 * w + i`.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode); a set bit at or beyond `num_detectors`
    /// is [`DecodeError::DetectorOutOfRange`].
    pub fn decode_dense(&self, syndrome: &[u64]) -> DecodeResult<u64> {
        let mut detections = Vec::new();
        for_each_set_bit(syndrome, |d| detections.push(d as u64));
        self.decode(&detections)
    }

    /// Finds a minimum-cost set of mechanisms explaining `detections`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::DetectorOutOfRange`] for a detection outside the model.
    /// - [`DecodeError::NoExplanation`] if no combination of mechanisms
    ///   reproduces the syndrome.
    /// - [`DecodeError::BudgetExceeded`] if the search limits are hit first.
    pub fn decode_to_errors(&self, detections: &[u64]) -> DecodeResult<Decoding> {
        let residual = self.syndrome_from(detections)?;
        let outcome = self.search(residual);
        match &outcome {
            Ok(decoding) => trace!(
                detections = detections.len(),
                explored = decoding.explored,
                mechanisms = decoding.mechanisms.len(),
                observables = decoding.observables,
                "decoded syndrome"
            ),
            Err(DecodeError::BudgetExceeded { explored, elapsed }) => warn!(
                detections = detections.len(),
                explored,
                ?elapsed,
                "search budget exceeded"
            ),
            Err(err) => trace!(detections = detections.len(), %err, "decode failed"),
        }
        outcome
    }

    /// XOR of the observable masks of the given mechanisms.
    ///
    /// # Panics
    ///
    /// Panics if an index is not a mechanism of the model.
    #[must_use]
    pub fn mask_from_errors(&self, mechanisms: &[usize]) -> u64 {
        mechanisms
            .iter()
            .fold(0, |acc, &i| acc ^ self.model.mechanisms()[i].observables())
    }

    /// Summed cost of the given mechanisms.
    ///
    /// # Panics
    ///
    /// Panics if an index is not a mechanism of the model.
    #[must_use]
    pub fn cost_from_errors(&self, mechanisms: &[usize]) -> f64 {
        mechanisms.iter().map(|&i| self.costs[i]).sum()
    }

    /// Validates detections and reduces them to a sorted parity set.
    fn syndrome_from(&self, detections: &[u64]) -> DecodeResult<Residual> {
        let num_detectors = self.model.num_detectors();
        let mut sorted = Residual::new();
        for &d in detections {
            if d >= u64::from(num_detectors) {
                return Err(DecodeError::DetectorOutOfRange {
                    detector: d,
                    num_detectors,
                });
            }
            sorted.push(d as u32);
        }
        sorted.sort_unstable();

        let mut residual = Residual::new();
        for &d in sorted.iter() {
            if residual.last() == Some(&d) {
                residual.pop();
            } else {
                residual.push(d);
            }
        }
        Ok(residual)
    }

    /// Lower bound on the cost still needed to explain `residual`.
    fn lower_bound(&self, residual: &[u32]) -> f64 {
        match self.config.heuristic {
            Heuristic::DetectorCost => residual
                .iter()
                .map(|&d| self.detector_share[d as usize])
                .sum(),
            Heuristic::MinMechanism => residual
                .iter()
                .map(|&d| self.detector_min[d as usize])
                .reduce(f64::min)
                .unwrap_or(0.0),
        }
    }

    fn search(&self, residual: Residual) -> DecodeResult<Decoding> {
        if residual.is_empty() {
            return Ok(Decoding {
                mechanisms: Vec::new(),
                observables: 0,
                cost: 0.0,
                explored: 0,
            });
        }
        if residual.iter().any(|&d| self.index.is_isolated(d)) {
            return Err(DecodeError::NoExplanation);
        }

        let start = Instant::now();
        let mut steps: Vec<Step> = Vec::new();
        let mut closed: HashSet<Residual> = HashSet::new();
        let mut frontier: BinaryHeap<Frontier> = BinaryHeap::new();
        let mut seq = 0u64;
        let mut explored = 0usize;

        frontier.push(Frontier {
            priority: self.lower_bound(&residual),
            cost: 0.0,
            seq,
            step: NO_PARENT,
            observables: 0,
            residual,
        });

        while let Some(state) = frontier.pop() {
            if state.residual.is_empty() {
                return Ok(self.finish(&steps, state.step, state.observables, explored));
            }
            if closed.contains(&state.residual) {
                continue;
            }

            if explored >= self.config.max_explored_states {
                return Err(DecodeError::BudgetExceeded {
                    explored,
                    elapsed: start.elapsed(),
                });
            }
            if let Some(budget) = self.config.time_budget {
                if explored % CLOCK_CHECK_INTERVAL == 0 && start.elapsed() >= budget {
                    return Err(DecodeError::BudgetExceeded {
                        explored,
                        elapsed: start.elapsed(),
                    });
                }
            }
            explored += 1;

            let pivot = state.residual[0];
            for &m in self.index.mechanisms_for(pivot) {
                let mechanism = &self.model.mechanisms()[m as usize];
                let child: Residual = symmetric_difference(&state.residual, mechanism.detectors());
                if closed.contains(&child) {
                    continue;
                }
                let cost = state.cost + self.costs[m as usize];
                steps.push(Step {
                    parent: state.step,
                    mechanism: m,
                });
                seq += 1;
                frontier.push(Frontier {
                    priority: cost + self.lower_bound(&child),
                    cost,
                    seq,
                    step: (steps.len() - 1) as u32,
                    observables: state.observables ^ mechanism.observables(),
                    residual: child,
                });
            }
            closed.insert(state.residual);
        }

        Err(DecodeError::NoExplanation)
    }

    /// Walks the parent chain back to the root.
    ///
    /// A mechanism reached twice along one chain cancels itself, so pairs are
    /// dropped before costing the result.
    fn finish(&self, steps: &[Step], mut step: u32, observables: u64, explored: usize) -> Decoding {
        let mut chosen = Vec::new();
        while step != NO_PARENT {
            let record = steps[step as usize];
            chosen.push(record.mechanism as usize);
            step = record.parent;
        }
        chosen.sort_unstable();

        let mut mechanisms: Vec<usize> = Vec::with_capacity(chosen.len());
        for m in chosen {
            if mechanisms.last() == Some(&m) {
                mechanisms.pop();
            } else {
                mechanisms.push(m);
            }
        }

        Decoding {
            cost: self.cost_from_errors(&mechanisms),
            mechanisms,
            observables,
            explored,
        }
    }
}
