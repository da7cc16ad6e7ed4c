//! # krama-core: Detector Error Model Algebra and Search Decoding
//!
//! `krama-core` reads detector error models (DEMs), brings them into a
//! canonical form, and decodes syndromes against them with a best-first
//! search that returns a most-likely explanation.
//!
//! ## Overview
//!
//! A DEM lists independent error *mechanisms*. Each fires with some
//! probability and, when it fires, flips a set of detectors and a set of
//! logical observables. Given the detectors that fired in one shot, the
//! decoder:
//!
//! 1. **Narrows candidates** - only mechanisms touching the lowest unexplained
//!    detector are tried at each step
//! 2. **Orders by cost** - `-ln(p / (1 - p))` per mechanism, plus an admissible
//!    lower bound on what is still unexplained
//! 3. **Reports the observable flips** of the first complete explanation
//!
//! ## Quick Start
//!
//! ```
//! use krama_core::{canonicalize, parse_dem, SearchDecoder};
//!
//! let model = parse_dem(
//!     "error(0.1) D0\n\
//!      error(0.1) D0 D1\n\
//!      error(0.1) D1 L0\n",
//! )
//! .unwrap();
//! let decoder = SearchDecoder::new(canonicalize(&model)).unwrap();
//!
//! assert_eq!(decoder.decode(&[]).unwrap(), 0);
//! assert_eq!(decoder.decode(&[1]).unwrap(), 1);
//! assert_eq!(decoder.decode(&[0]).unwrap(), 0);
//! ```
//!
//! ## Module Organization
//!
//! - [`model`] - symptoms, mechanisms, models and their canonicalization
//! - [`dem`] - DEM text parsing and rendering
//! - [`decoder`] - syndrome index, configuration and the search decoder
//! - [`inline_vec`] - small-buffer vector used for symptoms and residuals
//! - [`bits`] - word-level bit helpers
//! - [`error`] - model and decode error types

#![deny(missing_docs)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Word-level bit manipulation.
pub mod bits;

/// Syndrome index and search decoder.
pub mod decoder;

/// DEM text format.
pub mod dem;

/// Error types.
pub mod error;

/// Small-buffer vector with inline capacity.
pub mod inline_vec;

/// Error model types and algebra.
pub mod model;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Containers
pub use inline_vec::InlineVec;

// Model types
pub use model::{DetectorList, ErrorModel, Mechanism, Symptom, Target, MAX_OBSERVABLES};

// Model algebra
pub use model::{
    canonicalize, dem_from_counts, dem_stats, find_redundant_errors, merge_identical_errors,
    remove_zero_probability_errors, xor_probability, DemStats, Gf2Basis,
};

// Text format
pub use dem::parse_dem;

// Decoding
pub use decoder::{
    Decoding, DecoderBuilder, Heuristic, SearchConfig, SearchDecoder, SyndromeIndex,
};

// Errors
pub use error::{DecodeError, DecodeResult, ModelError, ModelResult};
