//! Exception types and error conversion.

use krama_core::{DecodeError, ModelError};
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::PyErr;

create_exception!(
    _krama,
    DecodingFailure,
    PyException,
    "No combination of error mechanisms explains the syndrome."
);

create_exception!(
    _krama,
    SearchBudgetExceeded,
    PyException,
    "The search hit its state or time limit; a larger budget may succeed."
);

/// Every model error is a caller mistake.
pub fn model_error(err: ModelError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn decode_error(err: DecodeError) -> PyErr {
    match err {
        DecodeError::NoExplanation => DecodingFailure::new_err(err.to_string()),
        DecodeError::BudgetExceeded { .. } => SearchBudgetExceeded::new_err(err.to_string()),
        DecodeError::DetectorOutOfRange { .. } => PyValueError::new_err(err.to_string()),
    }
}
