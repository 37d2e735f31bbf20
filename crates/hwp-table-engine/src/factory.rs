//! Table creation and bulk data streaming.
//!
//! Creation tries the host's one-shot table command first and falls back to
//! the structured parameter set when that fails. Data is then streamed cell
//! by cell with a carriage-return walk: right across a row, back left to
//! column 1, down one row.

use hwp_action_protocol::Direction;

use crate::address::{CellAddress, TableData, TableDimensions};
use crate::addresser::move_to_steps;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result, SurfaceError};
use crate::outcome::Outcome;
use crate::program::{self, Instruction, Program};
use crate::surface::AutomationSurface;

/// Which creation path produced the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStrategy {
    FastPath,
    Structured,
}

/// Result of the first creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationAttempt {
    Success(CreationStrategy),
    FastPathFailed(SurfaceError),
}

/// Where the filled table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    Created {
        dims: TableDimensions,
        strategy: CreationStrategy,
    },
    /// The cursor was already inside a table, which was filled in place.
    Existing,
}

/// Everything `TableFactory::create` can end in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReport {
    /// Data was written to every cell present in the payload.
    Filled {
        origin: TableOrigin,
        rows: usize,
        cells: usize,
    },
    /// A table was created and there was no data to write.
    Created {
        dims: TableDimensions,
        strategy: CreationStrategy,
    },
    /// The cursor was already inside a table and there was no data.
    AlreadyInTable,
    /// The table exists but streaming data into it stopped early.
    FillFailed { origin: TableOrigin, error: EngineError },
    /// Neither creation strategy worked; no data was written.
    CreationFailed { error: EngineError },
    /// Refused before any primitive was issued.
    Rejected(EngineError),
}

impl From<TableReport> for Outcome {
    fn from(report: TableReport) -> Self {
        match report {
            TableReport::Filled {
                origin: TableOrigin::Created { dims, .. },
                rows,
                cells,
            } => Outcome::success(format!(
                "Created a {dims} table and filled {rows} rows ({cells} cells)"
            )),
            TableReport::Filled {
                origin: TableOrigin::Existing,
                rows,
                cells,
            } => Outcome::success(format!(
                "Filled {rows} rows ({cells} cells) into the existing table"
            )),
            TableReport::Created { dims, .. } => {
                Outcome::success(format!("Created a {dims} table"))
            }
            TableReport::AlreadyInTable => {
                Outcome::success("Cursor is already inside a table; no table created")
            }
            TableReport::FillFailed {
                origin: TableOrigin::Created { dims, .. },
                error,
            } => Outcome::partial(
                &format!("a {dims} table was created but filling data failed"),
                &error,
            ),
            TableReport::FillFailed {
                origin: TableOrigin::Existing,
                error,
            } => Outcome::failure_in("filling the existing table failed", &error),
            TableReport::CreationFailed { error } | TableReport::Rejected(error) => {
                Outcome::failure(&error)
            }
        }
    }
}

/// Compile the cell-by-cell write of `data`, starting at the current cell.
///
/// Row 0 is bracketed by the configured header emphasis when `header` is
/// set. The exit step (select, cancel, move down) is appended when the
/// config asks to leave the table afterwards.
pub fn compile_data_fill(data: &TableData, header: bool, config: &EngineConfig) -> Program {
    let emphasis = config.header_emphasis;
    let emphasize = header && !emphasis.is_empty();
    let last_row = data.row_count().saturating_sub(1);

    let mut program = Program::new();
    for (r, row) in data.rows().iter().enumerate() {
        let last_col = row.len().saturating_sub(1);
        for (c, text) in row.iter().enumerate() {
            program
                .push(Instruction::SelectCell)
                .push(Instruction::Delete);
            if emphasize && r == 0 {
                program
                    .push(Instruction::SetEmphasis(emphasis))
                    .push(Instruction::Insert(text.clone()))
                    .push(Instruction::SetEmphasis(emphasis.reverted()));
            } else {
                program.push(Instruction::Insert(text.clone()));
            }
            if c < last_col {
                program.push(Instruction::Move(Direction::Right));
            }
        }
        if r < last_row {
            program
                .repeat(Instruction::Move(Direction::Left), last_col as u32)
                .push(Instruction::Move(Direction::Down));
        }
    }

    if config.leave_table_after_fill {
        program
            .push(Instruction::SelectCell)
            .push(Instruction::CancelSelection)
            .push(Instruction::Move(Direction::Down));
    }
    program
}

/// Creates tables and streams data into them.
pub struct TableFactory<'a, S: AutomationSurface + ?Sized> {
    surface: &'a mut S,
    config: EngineConfig,
}

impl<'a, S: AutomationSurface + ?Sized> TableFactory<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Create a table (unless the cursor is already in one) and fill it.
    pub fn create_with_data(
        &mut self,
        dims: TableDimensions,
        data: Option<&TableData>,
        header: bool,
    ) -> Outcome {
        self.create(dims, data, header).into()
    }

    /// Same as [`TableFactory::create_with_data`], keeping the structured
    /// report.
    pub fn create(
        &mut self,
        dims: TableDimensions,
        data: Option<&TableData>,
        header: bool,
    ) -> TableReport {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return TableReport::Rejected(e);
        }
        let data = data.filter(|d| !d.is_empty());

        let origin = if self.config.probe_existing_table && self.cursor_in_table() {
            tracing::info!("Cursor already inside a table, skipping creation");
            TableOrigin::Existing
        } else {
            match self.create_table(dims) {
                Ok(strategy) => {
                    tracing::info!("Created {dims} table via {strategy:?}");
                    TableOrigin::Created { dims, strategy }
                }
                Err(error) => return TableReport::CreationFailed { error },
            }
        };

        let Some(data) = data else {
            return match origin {
                TableOrigin::Created { dims, strategy } => TableReport::Created { dims, strategy },
                TableOrigin::Existing => TableReport::AlreadyInTable,
            };
        };

        match self.stream(compile_data_fill(data, header, &self.config)) {
            Ok(()) => TableReport::Filled {
                origin,
                rows: data.row_count(),
                cells: data.cell_count(),
            },
            Err(error) => {
                tracing::warn!("Table data fill stopped early: {error}");
                TableReport::FillFailed { origin, error }
            }
        }
    }

    /// Fill the table the cursor is in, starting at `start`.
    pub fn fill_existing(&mut self, data: &TableData, start: CellAddress, header: bool) -> Outcome {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return Outcome::failure(&e);
        }
        if data.is_empty() {
            return Outcome::success("No data to fill");
        }

        if let Err(e) = program::run(self.surface, move_to_steps(start, true)) {
            program::settle(self.surface);
            return Outcome::failure_in("filling the table failed", &e);
        }
        match self.stream(compile_data_fill(data, header, &self.config)) {
            Ok(()) => Outcome::success(format!(
                "Filled {} rows ({} cells) starting at cell {start}",
                data.row_count(),
                data.cell_count()
            )),
            Err(e) => Outcome::failure_in("filling the table failed", &e),
        }
    }

    /// Issue the one-shot creation command.
    pub fn try_fast_path(&mut self, dims: TableDimensions) -> CreationAttempt {
        match self.surface.create_table_fast(dims.rows(), dims.cols()) {
            Ok(()) => CreationAttempt::Success(CreationStrategy::FastPath),
            Err(e) => CreationAttempt::FastPathFailed(e),
        }
    }

    fn create_table(&mut self, dims: TableDimensions) -> Result<CreationStrategy> {
        let fast = match self.try_fast_path(dims) {
            CreationAttempt::Success(strategy) => return Ok(strategy),
            CreationAttempt::FastPathFailed(e) => e,
        };
        tracing::debug!("Fast table creation failed ({fast}), trying structured parameters");

        self.surface
            .create_table_structured(
                dims.rows(),
                dims.cols(),
                self.config.width_fit,
                self.config.height_fit,
            )
            .map(|()| CreationStrategy::Structured)
            .map_err(|structured| EngineError::CreationFailed { fast, structured })
    }

    /// A probe error counts as "not in a table"; creation then decides.
    fn cursor_in_table(&mut self) -> bool {
        match self.surface.probe_inside_table() {
            Ok(inside) => inside,
            Err(e) => {
                tracing::warn!("Table probe failed, assuming cursor is outside a table: {e}");
                false
            }
        }
    }

    /// Run a data fill. On failure, switch header emphasis back off if the
    /// failing step was inside the header row, then drop any selection.
    fn stream(&mut self, program: Program) -> Result<()> {
        let result = program::execute(self.surface, &program);
        let Err(error) = &result else {
            return result;
        };
        if let EngineError::Primitive { index, .. } = error {
            let header_on = self.config.header_emphasis;
            if !header_on.is_empty() && program.last_emphasis_before(*index) == Some(header_on) {
                if let Err(e) = self.surface.set_emphasis(header_on.reverted()) {
                    tracing::warn!("Could not switch header emphasis off after failure: {e}");
                }
            }
        }
        program::settle(self.surface);
        result
    }
}
