//! Main CompiledDecoder class for Python.

use std::time::Duration;

use krama_core::{canonicalize, parse_dem, DecoderBuilder, SearchDecoder};
use pyo3::prelude::*;

use crate::errors::{decode_error, model_error};

/// Search decoder compiled from a detector error model.
///
/// The model is parsed, identical mechanisms are merged and zero-probability
/// mechanisms are dropped before the decoder is built. A compiled decoder is
/// immutable and may be shared between threads; `decode` releases the GIL.
///
/// Examples
/// --------
/// >>> import krama
/// >>> decoder = krama.compile_decoder_for_dem("error(0.5) D0 L0\nerror(0.5) D1\n")
/// >>> decoder.decode([0])
/// 1
/// >>> decoder.decode([])
/// 0
#[pyclass(frozen, module = "krama")]
pub struct CompiledDecoder {
    inner: SearchDecoder,
}

impl CompiledDecoder {
    fn build(
        dem: &str,
        max_explored_states: Option<usize>,
        time_budget: Option<f64>,
    ) -> PyResult<Self> {
        let model = canonicalize(&parse_dem(dem).map_err(model_error)?);

        let mut builder = DecoderBuilder::new();
        if let Some(limit) = max_explored_states {
            builder = builder.max_explored_states(limit);
        }
        if let Some(seconds) = time_budget {
            let budget = Duration::try_from_secs_f64(seconds).map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "invalid time_budget {seconds}: {e}"
                ))
            })?;
            builder = builder.time_budget(budget);
        }

        let inner = builder.build(model).map_err(model_error)?;
        Ok(Self { inner })
    }

    pub fn from_dem(dem: &str) -> PyResult<Self> {
        Self::build(dem, None, None)
    }
}

#[pymethods]
impl CompiledDecoder {
    /// Compile a decoder from detector error model text.
    ///
    /// Parameters
    /// ----------
    /// dem : str
    ///     Detector error model text.
    /// max_explored_states : int, optional
    ///     Search state limit per decode call (default: 1000000).
    /// time_budget : float, optional
    ///     Wall-clock limit per decode call, in seconds (default: none).
    ///
    /// Returns
    /// -------
    /// CompiledDecoder
    ///     A reusable decoder.
    ///
    /// Raises
    /// ------
    /// ValueError
    ///     If the model text is malformed, a probability is zero or above
    ///     0.5 after merging, or `time_budget` is negative.
    #[staticmethod]
    #[pyo3(name = "from_dem", signature = (dem, max_explored_states=None, time_budget=None))]
    fn py_from_dem(
        dem: &str,
        max_explored_states: Option<usize>,
        time_budget: Option<f64>,
    ) -> PyResult<Self> {
        Self::build(dem, max_explored_states, time_budget)
    }

    /// Predict the observable flips for a syndrome.
    ///
    /// Parameters
    /// ----------
    /// detections : list[int]
    ///     Indices of the detectors that fired, in any order.
    ///
    /// Returns
    /// -------
    /// int
    ///     Bitmask of predicted observable flips (bit i = observable Li).
    ///
    /// Raises
    /// ------
    /// DecodingFailure
    ///     If no combination of mechanisms explains the syndrome.
    /// SearchBudgetExceeded
    ///     If the search limits were hit first.
    /// ValueError
    ///     If a detection is not a detector of the model.
    fn decode(&self, py: Python<'_>, detections: Vec<u64>) -> PyResult<u64> {
        py.allow_threads(|| self.inner.decode(&detections))
            .map_err(decode_error)
    }

    /// Find the most likely set of error mechanisms for a syndrome.
    ///
    /// Parameters
    /// ----------
    /// detections : list[int]
    ///     Indices of the detectors that fired, in any order.
    ///
    /// Returns
    /// -------
    /// list[int]
    ///     Indices (ascending) into the compiled, canonicalized model.
    ///
    /// Raises
    /// ------
    /// Same as `decode`.
    fn decode_to_errors(&self, py: Python<'_>, detections: Vec<u64>) -> PyResult<Vec<usize>> {
        py.allow_threads(|| self.inner.decode_to_errors(&detections))
            .map(|decoding| decoding.mechanisms)
            .map_err(decode_error)
    }

    /// Observable bitmask produced by the given mechanisms.
    fn mask_from_errors(&self, errors: Vec<usize>) -> PyResult<u64> {
        self.check_indices(&errors)?;
        Ok(self.inner.mask_from_errors(&errors))
    }

    /// Summed cost of the given mechanisms.
    fn cost_from_errors(&self, errors: Vec<usize>) -> PyResult<f64> {
        self.check_indices(&errors)?;
        Ok(self.inner.cost_from_errors(&errors))
    }

    /// Number of detectors in the compiled model.
    #[getter]
    fn num_detectors(&self) -> u32 {
        self.inner.model().num_detectors()
    }

    /// Number of observables in the compiled model.
    #[getter]
    fn num_observables(&self) -> u32 {
        self.inner.model().num_observables()
    }

    /// Number of mechanisms after canonicalization.
    #[getter]
    fn num_errors(&self) -> usize {
        self.inner.model().len()
    }

    /// The compiled model as detector error model text.
    fn to_dem(&self) -> String {
        self.inner.model().to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "CompiledDecoder(num_detectors={}, num_observables={}, num_errors={})",
            self.num_detectors(),
            self.num_observables(),
            self.num_errors()
        )
    }
}

impl CompiledDecoder {
    fn check_indices(&self, errors: &[usize]) -> PyResult<()> {
        let len = self.inner.model().len();
        match errors.iter().find(|&&i| i >= len) {
            Some(i) => Err(PyErr::new::<pyo3::exceptions::PyIndexError, _>(format!(
                "error index {i} out of range for {len} errors"
            ))),
            None => Ok(()),
        }
    }
}
