//! Parsing of repeat blocks, detector shifts and declarations.

use krama_core::{parse_dem, ModelError};

const SURFACE_SNIPPET: &str = "\
# two rounds of a toy code
detector(0, 0, 0) D0
detector(1, 0, 0) D1
error(0.01) D0 L0
error(0.02) D0 D1
error(0.01) D1
repeat 2 {
    error(0.03) D0 D2
    error(0.03) D1 D3
    shift_detectors(0, 0, 1) 2
    detector(0, 0, 0) D0
    detector(1, 0, 0) D1
}
logical_observable L0
";

#[test]
fn test_repeat_and_shift() {
    let model = parse_dem(SURFACE_SNIPPET).unwrap();
    assert_eq!(model.len(), 7);
    assert_eq!(model.num_detectors(), 6);
    assert_eq!(model.num_observables(), 1);

    let dets: Vec<Vec<u32>> = model
        .mechanisms()
        .iter()
        .map(|m| m.detectors().to_vec())
        .collect();
    assert_eq!(
        dets,
        vec![
            vec![0],
            vec![0, 1],
            vec![1],
            vec![0, 2],
            vec![1, 3],
            vec![2, 4],
            vec![3, 5],
        ]
    );
}

#[test]
fn test_nested_repeat() {
    let text = "repeat 2 {\n repeat 3 {\n  error(0.1) D0\n  shift_detectors 1\n }\n}\n";
    let model = parse_dem(text).unwrap();
    assert_eq!(model.len(), 6);
    let first: Vec<u32> = model.mechanisms().iter().map(|m| m.detectors()[0]).collect();
    assert_eq!(first, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_declarations_extend_sizes() {
    let model = parse_dem("error(0.1) D0\ndetector D9\nlogical_observable L3\n").unwrap();
    assert_eq!(model.num_detectors(), 10);
    assert_eq!(model.num_observables(), 4);
}

#[test]
fn test_empty_input() {
    let model = parse_dem("\n# nothing here\n\n").unwrap();
    assert!(model.is_empty());
    assert_eq!(model.num_detectors(), 0);
}

#[test]
fn test_invalid_probability_is_rejected() {
    assert!(matches!(
        parse_dem("error(1.5) D0\n"),
        Err(ModelError::InvalidProbability { index: 0, .. })
    ));
    assert!(matches!(
        parse_dem("error(abc) D0\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
    assert!(matches!(
        parse_dem("error D0\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
}

#[test]
fn test_bad_targets_are_rejected() {
    assert!(matches!(
        parse_dem("error(0.1) D0 X3\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
    assert!(matches!(
        parse_dem("error(0.1) Dx\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
    assert!(matches!(
        parse_dem("error(0.1) D0 L64\n"),
        Err(ModelError::ObservableOutOfRange { observable: 64, .. })
    ));
}

#[test]
fn test_bad_repeat_header() {
    assert!(matches!(
        parse_dem("error(0.1) D0\nrepeat x {\n}\n"),
        Err(ModelError::Syntax { line: 2, .. })
    ));
    assert!(matches!(
        parse_dem("repeat 3\nerror(0.1) D0\n}\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
}

#[test]
fn test_repeat_zero_times() {
    let model = parse_dem("repeat 0 {\n error(0.1) D5\n}\nerror(0.2) D0\n").unwrap();
    assert_eq!(model.len(), 1);
    assert_eq!(model.num_detectors(), 1);
}

#[test]
fn test_detector_shift_overflow() {
    assert!(matches!(
        parse_dem("shift_detectors 18446744073709551615\nshift_detectors 1\n"),
        Err(ModelError::Syntax { line: 2, .. })
    ));
}

#[test]
fn test_unbounded_repeat_is_rejected() {
    assert!(matches!(
        parse_dem("repeat 18446744073709551615 {\n error(0.1) D0\n}\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
    assert!(matches!(
        parse_dem("repeat 18446744073709551615 {\n}\n"),
        Err(ModelError::Syntax { line: 1, .. })
    ));
    // Nested blocks are bounded by their product.
    assert!(matches!(
        parse_dem("repeat 65536 {\n repeat 65536 {\n }\n}\n"),
        Err(ModelError::Syntax { line: 2, .. })
    ));
}

#[test]
fn test_repeat_within_step_limit() {
    let model = parse_dem("repeat 1000 {\n error(0.1) D0\n shift_detectors 1\n}\n").unwrap();
    assert_eq!(model.len(), 1000);
    assert_eq!(model.num_detectors(), 1000);
}
