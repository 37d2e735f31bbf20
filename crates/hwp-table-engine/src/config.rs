//! Engine configuration.

use hwp_action_protocol::{Emphasis, FitMode};
use serde::{Deserialize, Serialize};

/// Tunables shared by the table operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width mode passed to the structured creation fallback.
    pub width_fit: FitMode,
    /// Height mode passed to the structured creation fallback.
    pub height_fit: FitMode,
    /// Emphasis applied around header-row cells.
    pub header_emphasis: Emphasis,
    /// After streaming data, step out of the table so later edits do not
    /// land in the last cell.
    pub leave_table_after_fill: bool,
    /// Check whether the cursor is already in a table before creating one.
    pub probe_existing_table: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width_fit: FitMode::Fit,
            height_fit: FitMode::Fit,
            header_emphasis: Emphasis::bold(),
            leave_table_after_fill: true,
            probe_existing_table: true,
        }
    }
}
