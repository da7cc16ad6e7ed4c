//! Error model representation and algebra.
//!
//! - [`types`] - `Symptom`, `Mechanism`, `ErrorModel`
//! - [`canonical`] - merging, zero-probability pruning, count reweighting
//! - [`redundancy`] - GF(2) redundancy detection and batch statistics

pub mod canonical;
pub mod redundancy;
pub mod types;

pub use canonical::{
    canonicalize, dem_from_counts, merge_identical_errors, remove_zero_probability_errors,
    xor_probability,
};
pub use redundancy::{dem_stats, find_redundant_errors, DemStats, Gf2Basis};
pub use types::{
    DetectorList, ErrorModel, Mechanism, Symptom, Target, INLINE_DETECTORS, MAX_OBSERVABLES,
};
