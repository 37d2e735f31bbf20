//! Error types for the table engine.

use thiserror::Error;

use crate::address::CellAddress;

/// Result type alias using [`EngineError`]
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure of a single primitive call on the automation surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The host application did not accept input right now.
    #[error("host application is busy")]
    Busy,

    /// The primitive is not valid in the current document state.
    #[error("invalid document state: {0}")]
    InvalidState(String),

    /// The host's action expected a different parameter set.
    #[error("parameter mismatch: {0}")]
    ParameterMismatch(String),

    /// The host refused the primitive for any other reason.
    #[error("rejected by host: {0}")]
    Rejected(String),

    /// The connection to the host is gone.
    #[error("automation connection lost")]
    Disconnected,

    /// The transport between client and host failed.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Errors an engine operation resolves to before it is reported upward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No live automation connection.
    #[error("not connected to the document")]
    NotConnected,

    /// Non-positive row, column or dimension.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Merge range whose end lies above or left of its start.
    #[error("invalid range: start {start} must not be below or right of end {end}")]
    InvalidRange { start: CellAddress, end: CellAddress },

    /// Table payload that could not be interpreted as rows of text.
    #[error("invalid table data: {0}")]
    InvalidData(String),

    /// A primitive failed; the simulated cursor position is no longer trusted.
    #[error("step {index} ({step}) failed: {source}")]
    Primitive {
        index: usize,
        step: String,
        #[source]
        source: SurfaceError,
    },

    /// Both table-creation strategies failed.
    #[error("table creation failed (fast path: {fast}; structured: {structured})")]
    CreationFailed {
        fast: SurfaceError,
        structured: SurfaceError,
    },
}

impl EngineError {
    /// Create an invalid-input error with a message
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        EngineError::InvalidInput(msg.into())
    }
}
