//! The `(success, message)` result every public operation reports.

use std::fmt;

use crate::error::{EngineError, Result};

/// Prefix carried by every failure message.
pub const ERROR_MARKER: &str = "Error:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    /// An earlier phase took effect but a later one failed.
    PartialFailure,
    Failure,
}

/// Human-readable result of one engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
        }
    }

    pub fn failure(error: &EngineError) -> Self {
        Self {
            status: OutcomeStatus::Failure,
            message: format!("{ERROR_MARKER} {error}"),
        }
    }

    /// A failure with a leading description of what was attempted.
    pub fn failure_in(context: &str, error: &EngineError) -> Self {
        Self {
            status: OutcomeStatus::Failure,
            message: format!("{ERROR_MARKER} {context}: {error}"),
        }
    }

    /// `context` describes what did take effect before `error`.
    pub fn partial(context: &str, error: &EngineError) -> Self {
        Self {
            status: OutcomeStatus::PartialFailure,
            message: format!("{ERROR_MARKER} {context}: {error}"),
        }
    }

    /// Resolve an internal result to a reportable outcome.
    pub fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(message) => Self::success(message),
            Err(error) => Self::failure(&error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// The flat pair handed to the tool layer.
    pub fn into_parts(self) -> (bool, String) {
        (self.is_success(), self.message)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
