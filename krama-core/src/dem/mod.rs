//! Detector error model text format.
//!
//! Reading and writing the line-oriented DEM format:
//!
//! ```text
//! detector(1.5, 2.5, 0) D0
//! detector(2.5, 2.5, 0) D1
//! error(0.001) D0 D1
//! error(0.002) D0 ^ L0
//! ```
//!
//! - [`parser`] - text to [`ErrorModel`](crate::ErrorModel)
//! - [`writer`] - `Display` impls rendering a model back to text

pub mod parser;
pub mod writer;

pub use parser::parse_dem;
