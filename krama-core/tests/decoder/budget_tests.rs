//! Search limits and configuration.

use std::time::Duration;

use crate::common::{random_model, repetition_code};

use krama_core::{DecodeError, DecoderBuilder, Heuristic, SearchConfig, SearchDecoder};

#[test]
fn test_zero_state_budget() {
    let decoder = DecoderBuilder::new()
        .max_explored_states(0)
        .build(repetition_code(5, 0.1))
        .unwrap();

    match decoder.decode(&[1]) {
        Err(DecodeError::BudgetExceeded { explored, .. }) => assert_eq!(explored, 0),
        other => panic!("expected budget exceeded, got {other:?}"),
    }
    // Nothing to search for.
    assert_eq!(decoder.decode(&[]).unwrap(), 0);
}

#[test]
fn test_zero_time_budget() {
    let decoder = DecoderBuilder::new()
        .time_budget(Duration::ZERO)
        .build(repetition_code(5, 0.1))
        .unwrap();

    let err = decoder.decode(&[1]).unwrap_err();
    assert!(matches!(err, DecodeError::BudgetExceeded { explored: 0, .. }));
    assert!(err.is_retryable());
    assert_eq!(decoder.decode(&[]).unwrap(), 0);
}

#[test]
fn test_budget_is_distinct_from_failure() {
    let decoder = DecoderBuilder::new()
        .max_explored_states(1)
        .build(repetition_code(9, 0.1))
        .unwrap();

    let err = decoder.decode(&[0, 7]).unwrap_err();
    assert!(matches!(err, DecodeError::BudgetExceeded { explored: 1, .. }));
    assert!(err.is_retryable());
    assert_ne!(err, DecodeError::NoExplanation);
}

#[test]
fn test_larger_budget_recovers() {
    let m = repetition_code(9, 0.1);
    let tight = DecoderBuilder::new()
        .max_explored_states(1)
        .build(m.clone())
        .unwrap();
    let loose = SearchDecoder::new(m).unwrap();

    assert!(tight.decode(&[0, 7]).is_err());
    let decoding = loose.decode_to_errors(&[0, 7]).unwrap();
    assert_eq!(decoding.observables, 1);
    assert!(decoding.explored > 1);
}

#[test]
fn test_generous_time_budget_changes_nothing() {
    let m = random_model(3, 16, 40, 3, 2);
    let timed = DecoderBuilder::new()
        .time_budget(Duration::from_secs(60))
        .build(m.clone())
        .unwrap();
    let untimed = SearchDecoder::new(m).unwrap();

    for start in 0..8u64 {
        let detections = [start, start + 3, start + 7];
        assert_eq!(timed.decode(&detections), untimed.decode(&detections));
    }
}

#[test]
fn test_with_config_matches_builder() {
    let config = SearchConfig {
        max_explored_states: 50,
        time_budget: None,
        heuristic: Heuristic::MinMechanism,
    };
    let direct = SearchDecoder::with_config(repetition_code(4, 0.1), config).unwrap();
    let built = DecoderBuilder::new()
        .max_explored_states(50)
        .heuristic(Heuristic::MinMechanism)
        .build(repetition_code(4, 0.1))
        .unwrap();
    assert_eq!(direct.config(), built.config());
    assert_eq!(direct.decode(&[2]).unwrap(), built.decode(&[2]).unwrap());
}
