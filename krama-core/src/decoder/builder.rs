//! Search configuration and the builder for [`SearchDecoder`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use krama_core::{parse_dem, DecoderBuilder, Heuristic};
//!
//! let model = parse_dem("error(0.1) D0\nerror(0.1) D0 D1\nerror(0.1) D1 L0\n").unwrap();
//! let decoder = DecoderBuilder::new()
//!     .max_explored_states(10_000)
//!     .time_budget(Duration::from_millis(50))
//!     .heuristic(Heuristic::DetectorCost)
//!     .build(model)
//!     .unwrap();
//!
//! assert_eq!(decoder.decode(&[1]).unwrap(), 1);
//! ```

use std::time::Duration;

use crate::decoder::search::SearchDecoder;
use crate::error::ModelResult;
use crate::model::types::ErrorModel;

/// Admissible lower bound used to order the search frontier.
///
/// Both bounds are consistent, so the first explanation the search pops is a
/// minimum-cost one whichever is chosen; they differ only in how much of the
/// hypothesis space gets explored on the way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Sum over residual detectors of the cheapest per-detector share
    /// `cost(m) / |detectors(m)|` of any mechanism `m` touching it.
    #[default]
    DetectorCost,
    /// Cheapest single mechanism touching any residual detector.
    MinMechanism,
}

/// Per-call search limits and ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of states expanded per decode call.
    pub max_explored_states: usize,
    /// Optional wall-clock budget per decode call.
    pub time_budget: Option<Duration>,
    /// Frontier ordering bound.
    pub heuristic: Heuristic,
}

impl SearchConfig {
    /// Default expansion limit.
    pub const DEFAULT_MAX_EXPLORED_STATES: usize = 1_000_000;

    /// Default configuration: one million expansions, no time limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_explored_states: Self::DEFAULT_MAX_EXPLORED_STATES,
            time_budget: None,
            heuristic: Heuristic::DetectorCost,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing [`SearchDecoder`] instances.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecoderBuilder {
    config: SearchConfig,
}

impl DecoderBuilder {
    /// Creates a builder with [`SearchConfig::new`] defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: SearchConfig::new(),
        }
    }

    /// Sets the maximum number of states expanded per decode call.
    #[must_use]
    pub const fn max_explored_states(mut self, limit: usize) -> Self {
        self.config.max_explored_states = limit;
        self
    }

    /// Sets a wall-clock budget per decode call.
    #[must_use]
    pub const fn time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget = Some(budget);
        self
    }

    /// Selects the frontier ordering bound.
    #[must_use]
    pub const fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.config.heuristic = heuristic;
        self
    }

    /// The configuration assembled so far.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Builds the decoder.
    ///
    /// # Errors
    ///
    /// Fails if the model contains a mechanism with probability zero or above
    /// one half; see [`SearchDecoder::with_config`].
    pub fn build(self, model: ErrorModel) -> ModelResult<SearchDecoder> {
        SearchDecoder::with_config(model, self.config)
    }
}
