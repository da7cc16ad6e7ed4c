//! Error types for model algebra and decoding.
//!
//! Two families are kept apart:
//!
//! - [`ModelError`]: a caller handed over data that violates a precondition.
//!   These are always reported before any transformation starts, so no
//!   partially built model is ever observable.
//! - [`DecodeError`]: the outcome of a single decode call that did not produce
//!   a correction. [`DecodeError::NoExplanation`] and
//!   [`DecodeError::BudgetExceeded`] are ordinary results on adversarial or
//!   very dense syndromes; the decoder itself is never left in a bad state.

use std::time::Duration;

use thiserror::Error;

/// Result alias for model construction and canonicalization.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Precondition violations on error models and their inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Number of trial counts does not match the number of mechanisms.
    #[error("got {counts} counts for {mechanisms} non-zero-probability error mechanisms")]
    CountMismatch {
        /// Length of the supplied counts slice.
        counts: usize,
        /// Number of mechanisms the counts must align with.
        mechanisms: usize,
    },

    /// Count-based reconstruction needs at least one shot.
    #[error("number of shots must be greater than zero")]
    ZeroShots,

    /// A trial count exceeds the number of shots it was observed in.
    #[error("count {count} for mechanism {index} exceeds {shots} shots")]
    CountExceedsShots {
        /// Mechanism index.
        index: usize,
        /// Offending count.
        count: u64,
        /// Number of shots.
        shots: u64,
    },

    /// A zero-probability mechanism was found where it is not allowed.
    ///
    /// Run [`remove_zero_probability_errors`](crate::remove_zero_probability_errors)
    /// first.
    #[error("mechanism {index} has zero probability; remove zero-probability errors first")]
    ZeroProbability {
        /// Mechanism index.
        index: usize,
    },

    /// Probability outside the accepted range.
    #[error("mechanism {index} has probability {probability}, expected {expected}")]
    InvalidProbability {
        /// Mechanism index.
        index: usize,
        /// Offending probability.
        probability: f64,
        /// Human-readable accepted range.
        expected: &'static str,
    },

    /// A symptom references a detector beyond `num_detectors`.
    #[error("detector D{detector} out of range (num_detectors = {num_detectors})")]
    DetectorOutOfRange {
        /// Offending detector index.
        detector: u32,
        /// Declared detector count.
        num_detectors: u32,
    },

    /// A symptom flips an observable beyond `num_observables`.
    #[error("observable L{observable} out of range (num_observables = {num_observables})")]
    ObservableOutOfRange {
        /// Offending observable index.
        observable: u32,
        /// Declared observable count.
        num_observables: u32,
    },

    /// Observable masks are 64 bits wide.
    #[error("at most 64 observables are supported, got {0}")]
    TooManyObservables(u32),

    /// Malformed model text.
    #[error("line {line}: {reason}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}

impl ModelError {
    /// Every model error is a caller-side precondition violation.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        true
    }

    pub(crate) fn syntax(line: usize, reason: impl Into<String>) -> Self {
        ModelError::Syntax {
            line,
            reason: reason.into(),
        }
    }
}

/// Result alias for decode calls.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Outcomes of a decode call that carry no correction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No combination of mechanisms reproduces the syndrome.
    #[error("no combination of error mechanisms explains the syndrome")]
    NoExplanation,

    /// The search hit its state or time limit before finding an explanation.
    #[error("search budget exceeded after {explored} states in {elapsed:?}")]
    BudgetExceeded {
        /// States popped from the frontier.
        explored: usize,
        /// Wall-clock time spent.
        elapsed: Duration,
    },

    /// A detection index is not a detector of the model.
    #[error("detection D{detector} out of range (num_detectors = {num_detectors})")]
    DetectorOutOfRange {
        /// Offending detector index.
        detector: u64,
        /// Declared detector count.
        num_detectors: u32,
    },
}

impl DecodeError {
    /// True for caller-side precondition violations.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, DecodeError::DetectorOutOfRange { .. })
    }

    /// True when a larger budget might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, DecodeError::BudgetExceeded { .. })
    }
}
