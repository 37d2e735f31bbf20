//! Shared protocol types for communication between a native client and the
//! host process that owns the live word-processor document.
//!
//! The protocol is JSON-over-stdio: one JSON object per line in each direction.
//! Every action is a single cursor-relative primitive; the host has no notion
//! of absolute cell addresses.

use serde::{Deserialize, Serialize};

/// An action sent from the client to the automation host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The primitive to execute.
    #[serde(flatten)]
    pub action: Action,
}

/// Primitives the client can ask the host to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Action {
    /// Put the cursor in the upper-left cell of the table it is in.
    MoveToTableOrigin,

    /// Move the cursor one cell in the given direction.
    MoveCursor { direction: Direction },

    /// Select the cell under the cursor.
    SelectCurrentCell,

    /// Grow the current cell selection by one cell.
    ExtendSelection { direction: Direction },

    /// Drop any active selection, leaving the cursor where it is.
    CancelSelection,

    /// Delete the contents of the active selection.
    DeleteSelection,

    /// Insert text at the cursor.
    InsertText { text: String },

    /// Create a table with a single opaque instruction.
    CreateTableFast { rows: u32, cols: u32 },

    /// Create a table through an explicit parameter set.
    ///
    /// Column widths are never sent; the host keeps its defaults.
    CreateTableStructured {
        rows: u32,
        cols: u32,
        width_mode: FitMode,
        height_mode: FitMode,
    },

    /// Merge every cell in the active selection.
    MergeSelectedCells,

    /// Toggle character emphasis. Absent fields are left untouched.
    SetEmphasis(Emphasis),

    /// Select the run of characters immediately before the cursor.
    SelectPrecedingRun { chars: usize },

    /// Report whether the cursor is inside a table. The host must not leave
    /// a selection behind.
    ProbeInsideTable,
}

/// One-cell cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Sizing mode for the structured table-creation path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Stretch to the available paragraph width / content height.
    #[default]
    Fit,
    /// Keep the host's fixed default size.
    Fixed,
}

/// Character emphasis flags. `None` means "leave as is".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Emphasis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

impl Emphasis {
    /// Bold on, everything else untouched.
    pub fn bold() -> Self {
        Self {
            bold: Some(true),
            ..Self::default()
        }
    }

    /// Whether this value would change anything at all.
    pub fn is_empty(&self) -> bool {
        self.bold.is_none() && self.italic.is_none() && self.underline.is_none()
    }

    /// The emphasis that switches off exactly what `self` switched on.
    pub fn reverted(&self) -> Self {
        fn flip(flag: Option<bool>) -> Option<bool> {
            flag.map(|on| !on)
        }
        Self {
            bold: flip(self.bold),
            italic: flip(self.italic),
            underline: flip(self.underline),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// A response sent from the host back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the action.
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error {
        #[serde(default)]
        kind: HostErrorKind,
        message: String,
    },
}

/// Data returned in successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Answer to [`Action::ProbeInsideTable`].
    Probe { inside_table: bool },
}

/// Coarse classification of host-side failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostErrorKind {
    /// The host application is busy (modal dialog, pending repaint, ...).
    Busy,
    /// The action makes no sense in the current document state.
    InvalidState,
    /// The host's action table expected a different parameter set.
    ParameterMismatch,
    #[default]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_wire_shape() {
        let req = Request {
            id: 7,
            action: Action::MoveCursor {
                direction: Direction::Right,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "cmd": "MoveCursor", "params": {"direction": "right"}})
        );
    }

    #[test]
    fn test_structured_create_omits_widths() {
        let req = Request {
            id: 1,
            action: Action::CreateTableStructured {
                rows: 2,
                cols: 3,
                width_mode: FitMode::Fit,
                height_mode: FitMode::Fixed,
            },
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"width_mode\":\"fit\""));
        assert!(json.contains("\"height_mode\":\"fixed\""));
        assert!(!json.contains("width\":["));
    }

    #[test]
    fn test_emphasis_skips_untouched_flags() {
        let json = serde_json::to_string(&Emphasis::bold()).unwrap();
        assert_eq!(json, r#"{"bold":true}"#);
    }

    #[test]
    fn test_emphasis_reverted() {
        let on = Emphasis {
            bold: Some(true),
            italic: None,
            underline: Some(true),
        };
        let off = on.reverted();
        assert_eq!(off.bold, Some(false));
        assert_eq!(off.italic, None);
        assert_eq!(off.underline, Some(false));
        assert!(!off.is_empty());
        assert!(Emphasis::default().is_empty());
    }

    #[test]
    fn test_parse_probe_response() {
        let line = r#"{"id":3,"status":"ok","data":{"inside_table":true}}"#;
        let resp: Response = serde_json::from_str(line).unwrap();
        assert_eq!(resp.id, 3);
        assert_eq!(
            resp.result,
            ResponseResult::Ok {
                data: Some(ResponseData::Probe { inside_table: true })
            }
        );
    }

    #[test]
    fn test_parse_error_without_kind_defaults_to_other() {
        let line = r#"{"id":4,"status":"error","message":"no table"}"#;
        let resp: Response = serde_json::from_str(line).unwrap();
        assert_eq!(
            resp.result,
            ResponseResult::Error {
                kind: HostErrorKind::Other,
                message: "no table".to_string()
            }
        );
    }

    #[test]
    fn test_parse_busy_error() {
        let line = r#"{"id":5,"status":"error","kind":"busy","message":"modal dialog open"}"#;
        let resp: Response = serde_json::from_str(line).unwrap();
        match resp.result {
            ResponseResult::Error { kind, .. } => assert_eq!(kind, HostErrorKind::Busy),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
