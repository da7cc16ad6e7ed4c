//! DEM text writer.
//!
//! `ErrorModel` renders back into the text format read by
//! [`parse_dem`](super::parse_dem):
//!
//! ```text
//! error(0.1) D0 D1 L0
//! error(0.2) D1
//! detector D2
//! logical_observable L0
//! ```
//!
//! The trailing declarations pin the highest detector and observable index,
//! so the declared sizes survive a round trip even when no mechanism touches
//! them.

use core::fmt;

use crate::model::types::{ErrorModel, Mechanism, Target};

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error({})", self.probability)?;
        for target in self.symptom.targets() {
            match target {
                Target::Detector(d) => write!(f, " D{d}")?,
                Target::Observable(o) => write!(f, " L{o}")?,
                Target::Separator => write!(f, " ^")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for ErrorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in self.mechanisms() {
            writeln!(f, "{m}")?;
        }
        if self.num_detectors() > 0 {
            writeln!(f, "detector D{}", self.num_detectors() - 1)?;
        }
        if self.num_observables() > 0 {
            writeln!(f, "logical_observable L{}", self.num_observables() - 1)?;
        }
        Ok(())
    }
}
