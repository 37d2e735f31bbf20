//! JSON IPC with the automation host.

use std::io::{BufRead, Write};

use hwp_action_protocol::{
    Action, Direction, Emphasis, FitMode, HostErrorKind, Request, Response, ResponseData,
    ResponseResult,
};
use hwp_table_engine::{AutomationSurface, SurfaceError, SurfaceResult};

/// Errors from the host bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Bridge stream closed")]
    NotRunning,

    #[error("Failed to send action to bridge: {0}")]
    SendFailed(String),

    #[error("Failed to read response from bridge: {0}")]
    ReadFailed(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Bridge returned error: {message}")]
    Host { kind: HostErrorKind, message: String },

    #[error("Response id {got} does not match request id {expected}")]
    IdMismatch { expected: u64, got: u64 },

    #[error("Unexpected response data")]
    UnexpectedResponse,
}

impl From<BridgeError> for SurfaceError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::NotRunning => SurfaceError::Disconnected,
            BridgeError::Host { kind, message } => match kind {
                HostErrorKind::Busy => SurfaceError::Busy,
                HostErrorKind::InvalidState => SurfaceError::InvalidState(message),
                HostErrorKind::ParameterMismatch => SurfaceError::ParameterMismatch(message),
                HostErrorKind::Other => SurfaceError::Rejected(message),
            },
            other => SurfaceError::Transport(other.to_string()),
        }
    }
}

/// Configuration for the bridge client.
#[derive(Debug, Clone, Default)]
pub struct BridgeClientConfig {
    /// Log every request and response line at trace level.
    pub log_traffic: bool,
}

/// An [`AutomationSurface`] backed by a host bridge.
///
/// The caller owns the host process; this type only speaks the protocol
/// over the streams it is given. Once the stream closes the surface reports
/// itself disconnected and the engine stops issuing primitives.
pub struct BridgeSurface<R, W> {
    reader: R,
    writer: W,
    next_id: u64,
    connected: bool,
    config: BridgeClientConfig,
}

impl<R: BufRead, W: Write> BridgeSurface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, BridgeClientConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: BridgeClientConfig) -> Self {
        Self {
            reader,
            writer,
            next_id: 1,
            connected: true,
            config,
        }
    }

    /// Give back the underlying streams.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Send an action to the bridge and wait for the response.
    fn send_action(&mut self, action: Action) -> Result<Option<ResponseData>, BridgeError> {
        if !self.connected {
            return Err(BridgeError::NotRunning);
        }

        let id = self.next_id;
        self.next_id += 1;

        let request = Request { id, action };
        let json = serde_json::to_string(&request)?;
        if self.config.log_traffic {
            tracing::trace!("-> {json}");
        }

        writeln!(self.writer, "{json}").map_err(|e| BridgeError::SendFailed(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| BridgeError::SendFailed(e.to_string()))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| BridgeError::ReadFailed(e.to_string()))?;

        if line.is_empty() {
            tracing::warn!("Bridge stream closed while waiting for response {id}");
            self.connected = false;
            return Err(BridgeError::NotRunning);
        }
        if self.config.log_traffic {
            tracing::trace!("<- {}", line.trim_end());
        }

        // Once a line fails to parse or answers another request, later lines
        // cannot be paired with their requests.
        let response: Response = match serde_json::from_str(&line) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Unreadable response to request {id}, dropping connection: {e}");
                self.connected = false;
                return Err(e.into());
            }
        };
        if response.id != id {
            tracing::warn!(
                "Response id {} does not match request {id}, dropping connection",
                response.id
            );
            self.connected = false;
            return Err(BridgeError::IdMismatch {
                expected: id,
                got: response.id,
            });
        }

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { kind, message } => Err(BridgeError::Host { kind, message }),
        }
    }

    fn perform(&mut self, action: Action) -> SurfaceResult {
        self.send_action(action)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> AutomationSurface for BridgeSurface<R, W> {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn move_to_table_origin(&mut self) -> SurfaceResult {
        self.perform(Action::MoveToTableOrigin)
    }

    fn move_cursor(&mut self, direction: Direction) -> SurfaceResult {
        self.perform(Action::MoveCursor { direction })
    }

    fn select_current_cell(&mut self) -> SurfaceResult {
        self.perform(Action::SelectCurrentCell)
    }

    fn extend_selection(&mut self, direction: Direction) -> SurfaceResult {
        self.perform(Action::ExtendSelection { direction })
    }

    fn cancel_selection(&mut self) -> SurfaceResult {
        self.perform(Action::CancelSelection)
    }

    fn delete_selection(&mut self) -> SurfaceResult {
        self.perform(Action::DeleteSelection)
    }

    fn insert_text(&mut self, text: &str) -> SurfaceResult {
        self.perform(Action::InsertText {
            text: text.to_string(),
        })
    }

    fn create_table_fast(&mut self, rows: u32, cols: u32) -> SurfaceResult {
        self.perform(Action::CreateTableFast { rows, cols })
    }

    fn create_table_structured(
        &mut self,
        rows: u32,
        cols: u32,
        width_mode: FitMode,
        height_mode: FitMode,
    ) -> SurfaceResult {
        self.perform(Action::CreateTableStructured {
            rows,
            cols,
            width_mode,
            height_mode,
        })
    }

    fn merge_selected_cells(&mut self) -> SurfaceResult {
        self.perform(Action::MergeSelectedCells)
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) -> SurfaceResult {
        self.perform(Action::SetEmphasis(emphasis))
    }

    fn select_preceding_run(&mut self, chars: usize) -> SurfaceResult {
        self.perform(Action::SelectPrecedingRun { chars })
    }

    fn probe_inside_table(&mut self) -> SurfaceResult<bool> {
        match self.send_action(Action::ProbeInsideTable)? {
            Some(ResponseData::Probe { inside_table }) => Ok(inside_table),
            None => Err(BridgeError::UnexpectedResponse.into()),
        }
    }
}
