//! Shared test utilities for krama-core tests.
//!
//! Model builders, seeded random models, and exhaustive reference
//! implementations the fast paths are checked against.

#![allow(dead_code)] // Not all test files use all functions

use std::collections::{BTreeSet, HashSet};

use krama_core::{ErrorModel, Mechanism, Symptom};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Builds a model from `(probability, detectors, observable mask)` triples.
pub fn model(
    num_detectors: u32,
    num_observables: u32,
    mechanisms: &[(f64, &[u32], u64)],
) -> ErrorModel {
    ErrorModel::new(
        num_detectors,
        num_observables,
        mechanisms
            .iter()
            .map(|&(p, dets, obs)| Mechanism::new(p, Symptom::new(dets.iter().copied(), obs)))
            .collect(),
    )
    .expect("test model is valid")
}

/// Distance-`d` repetition code with a single logical on the first qubit.
///
/// Qubit 0 flips `D0` and `L0`, qubit `i` flips `D(i-1) D(i)`, and the last
/// qubit flips `D(d-2)` alone.
pub fn repetition_code(distance: u32, p: f64) -> ErrorModel {
    assert!(distance >= 2);
    let num_detectors = distance - 1;
    let mut mechanisms = vec![Mechanism::new(p, Symptom::new([0], 1))];
    for i in 1..distance - 1 {
        mechanisms.push(Mechanism::new(p, Symptom::new([i - 1, i], 0)));
    }
    mechanisms.push(Mechanism::new(p, Symptom::new([num_detectors - 1], 0)));
    ErrorModel::new(num_detectors, 1, mechanisms).expect("repetition code is valid")
}

/// Random model whose mechanisms each touch `1..=max_weight` detectors and
/// have probability in `[0.01, 0.4]`.
pub fn random_model(
    seed: u64,
    num_detectors: u32,
    num_mechanisms: usize,
    max_weight: usize,
    num_observables: u32,
) -> ErrorModel {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let obs_mask = if num_observables == 0 {
        0
    } else {
        (1u64 << num_observables) - 1
    };
    let mechanisms = (0..num_mechanisms)
        .map(|_| {
            let weight = rng.gen_range(1..=max_weight);
            let dets: Vec<u32> = (0..weight)
                .map(|_| rng.gen_range(0..num_detectors))
                .collect();
            let obs = rng.gen::<u64>() & obs_mask;
            let p = rng.gen_range(0.01..=0.4);
            Mechanism::new(p, Symptom::new(dets, obs))
        })
        .collect();
    ErrorModel::new(num_detectors, num_observables, mechanisms).expect("random model is valid")
}

/// Detectors flipped by firing exactly the given mechanisms.
pub fn syndrome_of(model: &ErrorModel, mechanisms: &[usize]) -> Vec<u64> {
    let symptom = mechanisms
        .iter()
        .fold(Symptom::default(), |acc, &i| acc.xor(&model.mechanisms()[i].symptom));
    symptom.detectors().iter().map(|&d| u64::from(d)).collect()
}

/// Minimum total cost over all mechanism subsets reproducing `detections`,
/// or `None` if no subset does. Exponential; keep models small.
pub fn brute_force_min_cost(model: &ErrorModel, detections: &[u64]) -> Option<f64> {
    let n = model.len();
    assert!(n <= 16, "brute force is exponential in mechanism count");
    let target: BTreeSet<u32> = detections.iter().map(|&d| d as u32).collect();

    let mut best: Option<f64> = None;
    for subset in 0u32..(1 << n) {
        let mut flipped = BTreeSet::new();
        let mut cost = 0.0;
        for i in 0..n {
            if subset & (1 << i) != 0 {
                let m = &model.mechanisms()[i];
                cost += m.cost();
                for &d in m.detectors() {
                    if !flipped.remove(&d) {
                        flipped.insert(d);
                    }
                }
            }
        }
        if flipped == target && best.map_or(true, |b| cost < b) {
            best = Some(cost);
        }
    }
    best
}

/// Redundant indices by span enumeration: mechanism `i` is redundant when
/// its symptom equals the XOR of some subset of the mechanisms before it.
pub fn brute_force_redundant(model: &ErrorModel) -> BTreeSet<usize> {
    let mut span: HashSet<Symptom> = HashSet::new();
    span.insert(Symptom::default());
    let mut redundant = BTreeSet::new();
    for (i, m) in model.mechanisms().iter().enumerate() {
        if span.contains(&m.symptom) {
            redundant.insert(i);
            continue;
        }
        let shifted: Vec<Symptom> = span.iter().map(|s| s.xor(&m.symptom)).collect();
        span.extend(shifted);
    }
    redundant
}

/// Asserts that `mechanisms` reproduce `detections` exactly.
pub fn assert_explains(model: &ErrorModel, mechanisms: &[usize], detections: &[u64]) {
    let mut expected: Vec<u64> = detections.to_vec();
    expected.sort_unstable();
    assert_eq!(
        syndrome_of(model, mechanisms),
        expected,
        "mechanisms {mechanisms:?} do not explain {detections:?}"
    );
}
