//! Error taxonomy.
//!
//! Two kinds of failure leave a component: hard stops ([`EngineError`],
//! surfaced to the caller for user-facing messaging) and structured
//! parameter-validation results ([`ValidationReport`], never raised).
//! Math-domain issues (division by zero, infeasible combinatorial
//! requests) are resolved inside each function with sentinel returns
//! (`0`, `f64::INFINITY`) and documented there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),

    #[error("strategy `{strategy}` is not supported for lottery `{lottery}`")]
    UnsupportedStrategy { strategy: String, lottery: String },
}

/// One rejected parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub parameter: String,
    pub message: String,
}

/// Outcome of strategy-parameter validation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}
