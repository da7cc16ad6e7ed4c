//! Python bindings for the krama-core search decoder.
//!
//! This module provides PyO3 bindings for compiling a detector error model
//! once and decoding many syndromes against it.

use pyo3::prelude::*;

mod decoder;
mod errors;

use decoder::CompiledDecoder;
use errors::{model_error, DecodingFailure, SearchBudgetExceeded};

/// Most-likely-error decoding for detector error models.
///
/// Exposes `CompiledDecoder`, the `compile_decoder_for_dem` shortcut and
/// `dem_stats`, plus the `DecodingFailure` and `SearchBudgetExceeded`
/// exceptions raised by `decode`.
#[pymodule]
fn _krama(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CompiledDecoder>()?;
    m.add_function(wrap_pyfunction!(compile_decoder_for_dem, m)?)?;
    m.add_function(wrap_pyfunction!(dem_stats, m)?)?;
    m.add("DecodingFailure", m.py().get_type_bound::<DecodingFailure>())?;
    m.add(
        "SearchBudgetExceeded",
        m.py().get_type_bound::<SearchBudgetExceeded>(),
    )?;
    Ok(())
}

/// Compile a decoder for a detector error model.
///
/// Parameters
/// ----------
/// dem : str
///     Detector error model text.
///
/// Returns
/// -------
/// CompiledDecoder
///     A reusable decoder for the canonicalized model.
///
/// Raises
/// ------
/// ValueError
///     If the model text is malformed or contains unusable probabilities.
///
/// Notes
/// -----
/// After identical mechanisms are merged, every probability must lie in
/// ``(0, 0.5]``. Mechanisms more likely than not to fire would have a
/// negative search cost and are rejected rather than flipped.
#[pyfunction]
fn compile_decoder_for_dem(dem: &str) -> PyResult<CompiledDecoder> {
    CompiledDecoder::from_dem(dem)
}

/// Count the redundant error mechanisms of a detector error model.
///
/// Parameters
/// ----------
/// dem : str
///     Detector error model text.
/// merge_errors : bool, optional
///     Merge mechanisms with identical symptoms first (default: True).
///
/// Returns
/// -------
/// tuple[int, int]
///     ``(redundant, total)`` after merging (if enabled) and removing
///     zero-probability mechanisms.
///
/// Raises
/// ------
/// ValueError
///     If the model text is malformed.
#[pyfunction]
#[pyo3(signature = (dem, merge_errors=true))]
fn dem_stats(dem: &str, merge_errors: bool) -> PyResult<(usize, usize)> {
    let mut model = krama_core::parse_dem(dem).map_err(model_error)?;
    if merge_errors {
        model = krama_core::merge_identical_errors(&model);
    }
    let model = krama_core::remove_zero_probability_errors(&model);
    let stats = krama_core::dem_stats(&model);
    Ok((stats.redundant_mechanisms, stats.total_mechanisms))
}
