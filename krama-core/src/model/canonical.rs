//! Canonicalization passes over an [`ErrorModel`].
//!
//! Every pass is a pure function: the input model is borrowed, a new model is
//! returned, and all preconditions are checked before any output is built.
//! A *canonical* model is `remove_zero_probability_errors(merge_identical_errors(m))`.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::model::types::{ErrorModel, Mechanism, Symptom};

/// Probability that exactly one of two independent events fires.
///
/// `p1 + p2 - 2 p1 p2`, the parity rule for two mechanisms with the same
/// symptom: firing both cancels out.
#[inline]
#[must_use]
pub fn xor_probability(p1: f64, p2: f64) -> f64 {
    p1 + p2 - 2.0 * p1 * p2
}

/// Combines mechanisms that share an identical symptom.
///
/// Probabilities are combined with [`xor_probability`]. The output keeps the
/// first-occurrence order of each distinct symptom.
#[must_use]
pub fn merge_identical_errors(model: &ErrorModel) -> ErrorModel {
    let mut slot_of: HashMap<&Symptom, usize> = HashMap::with_capacity(model.len());
    let mut merged: Vec<Mechanism> = Vec::with_capacity(model.len());

    for m in model.mechanisms() {
        match slot_of.get(&m.symptom) {
            Some(&slot) => {
                let p = &mut merged[slot].probability;
                *p = xor_probability(*p, m.probability);
            }
            None => {
                slot_of.insert(&m.symptom, merged.len());
                merged.push(m.clone());
            }
        }
    }

    debug!(
        before = model.len(),
        after = merged.len(),
        "merged identical error mechanisms"
    );
    ErrorModel::derived(model, merged)
}

/// Drops every mechanism whose probability is exactly zero.
///
/// Relative order and model metadata are preserved.
#[must_use]
pub fn remove_zero_probability_errors(model: &ErrorModel) -> ErrorModel {
    let kept: Vec<Mechanism> = model
        .mechanisms()
        .iter()
        .filter(|m| m.probability != 0.0)
        .cloned()
        .collect();

    debug!(
        removed = model.len() - kept.len(),
        kept = kept.len(),
        "removed zero-probability error mechanisms"
    );
    ErrorModel::derived(model, kept)
}

/// Merges identical mechanisms, then drops zero-probability ones.
#[must_use]
pub fn canonicalize(model: &ErrorModel) -> ErrorModel {
    remove_zero_probability_errors(&merge_identical_errors(model))
}

/// Replaces each mechanism's probability with its empirical frequency
/// `count / num_shots`.
///
/// `counts[i]` is the number of shots in which mechanism `i` fired.
///
/// # Errors
///
/// - [`ModelError::ZeroShots`] if `num_shots == 0`.
/// - [`ModelError::CountMismatch`] if `counts.len()` differs from the number
///   of non-zero-probability mechanisms.
/// - [`ModelError::ZeroProbability`] if the model still contains a
///   zero-probability mechanism. Counts are only meaningful against a model
///   that went through [`remove_zero_probability_errors`]; accepting them
///   otherwise would silently shift every count onto the wrong mechanism.
/// - [`ModelError::CountExceedsShots`] if any count is above `num_shots`.
pub fn dem_from_counts(
    model: &ErrorModel,
    counts: &[u64],
    num_shots: u64,
) -> ModelResult<ErrorModel> {
    if num_shots == 0 {
        return Err(ModelError::ZeroShots);
    }
    let live = model.len() - model.count_zero_probability();
    if counts.len() != live {
        return Err(ModelError::CountMismatch {
            counts: counts.len(),
            mechanisms: live,
        });
    }
    if let Some(index) = model
        .mechanisms()
        .iter()
        .position(|m| m.probability == 0.0)
    {
        return Err(ModelError::ZeroProbability { index });
    }
    if let Some((index, &count)) = counts.iter().enumerate().find(|(_, &c)| c > num_shots) {
        return Err(ModelError::CountExceedsShots {
            index,
            count,
            shots: num_shots,
        });
    }

    let shots = num_shots as f64;
    let reweighted = model
        .mechanisms()
        .iter()
        .zip(counts)
        .map(|(m, &count)| Mechanism::new(count as f64 / shots, m.symptom.clone()))
        .collect();

    debug!(
        mechanisms = model.len(),
        shots = num_shots,
        "reweighted error mechanisms from counts"
    );
    Ok(ErrorModel::derived(model, reweighted))
}
