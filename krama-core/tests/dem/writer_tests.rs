//! Rendering models back to text.

use crate::common::{model, random_model};

use krama_core::{canonicalize, parse_dem};

#[test]
fn test_written_model_parses_back() {
    let model = canonicalize(&random_model(7, 20, 30, 4, 3));
    let text = model.to_string();
    let reparsed = parse_dem(&text).unwrap();
    assert_eq!(reparsed, model);
}

#[test]
fn test_separator_free_output() {
    let m = model(4, 2, &[(0.001, &[2, 0], 0b11), (0.25, &[], 0b01)]);
    assert_eq!(
        m.to_string(),
        "error(0.001) D0 D2 L0 L1\nerror(0.25) L0\ndetector D3\nlogical_observable L1\n"
    );
}

#[test]
fn test_empty_model_renders_nothing() {
    let m = model(0, 0, &[]);
    assert_eq!(m.to_string(), "");
}
