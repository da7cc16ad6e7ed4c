//! Merging and zero-probability pruning.

use crate::common::model;

use krama_core::{
    canonicalize, merge_identical_errors, remove_zero_probability_errors, xor_probability,
    ErrorModel,
};

fn probabilities(model: &ErrorModel) -> Vec<f64> {
    model.mechanisms().iter().map(|m| m.probability).collect()
}

#[test]
fn test_disjoint_mechanisms_unchanged() {
    let m = model(2, 0, &[(0.25, &[0], 0), (0.35, &[1], 0)]);
    let canonical = canonicalize(&m);
    assert_eq!(canonical, m);
    assert_eq!(probabilities(&canonical), vec![0.25, 0.35]);
}

#[test]
fn test_remove_zero_probability_keeps_order() {
    let m = model(3, 0, &[(0.1, &[0], 0), (0.0, &[1], 0), (0.2, &[2], 0)]);
    let pruned = remove_zero_probability_errors(&m);
    assert_eq!(pruned.len(), 2);
    assert_eq!(probabilities(&pruned), vec![0.1, 0.2]);
    assert_eq!(pruned.mechanisms()[1].detectors(), &[2]);
    assert_eq!(pruned.num_detectors(), 3);
}

#[test]
fn test_merge_uses_parity_rule_in_first_occurrence_order() {
    let m = model(
        3,
        1,
        &[
            (0.1, &[1, 2], 0),
            (0.2, &[0], 1),
            (0.3, &[1, 2], 0),
            (0.4, &[0], 1),
            (0.05, &[0], 0),
        ],
    );
    let merged = merge_identical_errors(&m);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.mechanisms()[0].detectors(), &[1, 2]);
    assert_eq!(merged.mechanisms()[1].observables(), 1);
    assert_eq!(merged.mechanisms()[2].probability, 0.05);

    let p = probabilities(&merged);
    assert!((p[0] - xor_probability(0.1, 0.3)).abs() < 1e-15);
    assert!((p[1] - xor_probability(0.2, 0.4)).abs() < 1e-15);
}

#[test]
fn test_merge_distinguishes_observables() {
    let m = model(1, 1, &[(0.1, &[0], 0), (0.1, &[0], 1)]);
    assert_eq!(merge_identical_errors(&m).len(), 2);
}

#[test]
fn test_merge_of_certain_pair_cancels_to_zero() {
    // Two certain flips of the same symptom always cancel.
    let m = model(1, 0, &[(1.0, &[0], 0), (1.0, &[0], 0)]);
    let canonical = canonicalize(&m);
    assert!(canonical.is_empty());
}

#[test]
fn test_xor_probability_is_associative() {
    let (a, b, c) = (0.1, 0.25, 0.4);
    let left = xor_probability(xor_probability(a, b), c);
    let right = xor_probability(a, xor_probability(b, c));
    assert!((left - right).abs() < 1e-15);
    assert_eq!(xor_probability(0.3, 0.0), 0.3);
}

#[test]
fn test_input_model_is_not_mutated() {
    let m = model(2, 0, &[(0.1, &[0], 0), (0.1, &[0], 0), (0.0, &[1], 0)]);
    let before = m.clone();
    let _ = canonicalize(&m);
    assert_eq!(m, before);
}
