//! A surface that records calls instead of driving a document.
//!
//! Useful for dry runs (see what a request would do before sending it to a
//! live host) and for tests, where failures can be injected per primitive.

use std::collections::HashMap;

use hwp_action_protocol::{Direction, Emphasis, FitMode};

use crate::error::SurfaceError;
use crate::surface::{AutomationSurface, SurfaceResult};

/// A recorded primitive call, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    MoveToTableOrigin,
    Move(Direction),
    SelectCell,
    Extend(Direction),
    CancelSelection,
    Delete,
    Insert(String),
    CreateTableFast {
        rows: u32,
        cols: u32,
    },
    CreateTableStructured {
        rows: u32,
        cols: u32,
        width_mode: FitMode,
        height_mode: FitMode,
    },
    Merge,
    SetEmphasis(Emphasis),
    SelectPrecedingRun(usize),
    ProbeInsideTable,
}

impl Call {
    pub fn primitive(&self) -> Primitive {
        match self {
            Call::MoveToTableOrigin => Primitive::MoveToTableOrigin,
            Call::Move(_) => Primitive::MoveCursor,
            Call::SelectCell => Primitive::SelectCell,
            Call::Extend(_) => Primitive::ExtendSelection,
            Call::CancelSelection => Primitive::CancelSelection,
            Call::Delete => Primitive::DeleteSelection,
            Call::Insert(_) => Primitive::InsertText,
            Call::CreateTableFast { .. } => Primitive::CreateTableFast,
            Call::CreateTableStructured { .. } => Primitive::CreateTableStructured,
            Call::Merge => Primitive::MergeCells,
            Call::SetEmphasis(_) => Primitive::SetEmphasis,
            Call::SelectPrecedingRun(_) => Primitive::SelectPrecedingRun,
            Call::ProbeInsideTable => Primitive::ProbeInsideTable,
        }
    }
}

/// Primitive kinds, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    MoveToTableOrigin,
    MoveCursor,
    SelectCell,
    ExtendSelection,
    CancelSelection,
    DeleteSelection,
    InsertText,
    CreateTableFast,
    CreateTableStructured,
    MergeCells,
    SetEmphasis,
    SelectPrecedingRun,
    ProbeInsideTable,
}

#[derive(Debug, Clone)]
struct FailureRule {
    primitive: Primitive,
    /// 1-based occurrence to fail on; `None` fails every call.
    occurrence: Option<usize>,
    error: SurfaceError,
}

/// Records every primitive call and answers from configuration.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    calls: Vec<Call>,
    counts: HashMap<Primitive, usize>,
    rules: Vec<FailureRule>,
    inside_table: bool,
    connected: bool,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            counts: HashMap::new(),
            rules: Vec::new(),
            inside_table: false,
            connected: true,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose connection is already gone.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::default()
        }
    }

    /// Answer `probe_inside_table` with `inside`.
    pub fn with_cursor_in_table(mut self, inside: bool) -> Self {
        self.inside_table = inside;
        self
    }

    /// Fail every call of `primitive`.
    pub fn fail_always(&mut self, primitive: Primitive, error: SurfaceError) -> &mut Self {
        self.rules.push(FailureRule {
            primitive,
            occurrence: None,
            error,
        });
        self
    }

    /// Fail only the `n`-th (1-based) call of `primitive`.
    pub fn fail_nth(&mut self, primitive: Primitive, n: usize, error: SurfaceError) -> &mut Self {
        self.rules.push(FailureRule {
            primitive,
            occurrence: Some(n),
            error,
        });
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Number of recorded calls of one primitive kind.
    pub fn count(&self, primitive: Primitive) -> usize {
        self.counts.get(&primitive).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.counts.clear();
    }

    fn record(&mut self, call: Call) -> SurfaceResult {
        let primitive = call.primitive();
        self.calls.push(call);
        let seen = self.counts.entry(primitive).or_insert(0);
        *seen += 1;
        let seen = *seen;

        let failure = self.rules.iter().find(|rule| {
            rule.primitive == primitive && rule.occurrence.map_or(true, |n| n == seen)
        });
        match failure {
            Some(rule) => Err(rule.error.clone()),
            None => Ok(()),
        }
    }
}

impl AutomationSurface for RecordingSurface {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn move_to_table_origin(&mut self) -> SurfaceResult {
        self.record(Call::MoveToTableOrigin)
    }

    fn move_cursor(&mut self, direction: Direction) -> SurfaceResult {
        self.record(Call::Move(direction))
    }

    fn select_current_cell(&mut self) -> SurfaceResult {
        self.record(Call::SelectCell)
    }

    fn extend_selection(&mut self, direction: Direction) -> SurfaceResult {
        self.record(Call::Extend(direction))
    }

    fn cancel_selection(&mut self) -> SurfaceResult {
        self.record(Call::CancelSelection)
    }

    fn delete_selection(&mut self) -> SurfaceResult {
        self.record(Call::Delete)
    }

    fn insert_text(&mut self, text: &str) -> SurfaceResult {
        self.record(Call::Insert(text.to_string()))
    }

    fn create_table_fast(&mut self, rows: u32, cols: u32) -> SurfaceResult {
        self.record(Call::CreateTableFast { rows, cols })
    }

    fn create_table_structured(
        &mut self,
        rows: u32,
        cols: u32,
        width_mode: FitMode,
        height_mode: FitMode,
    ) -> SurfaceResult {
        self.record(Call::CreateTableStructured {
            rows,
            cols,
            width_mode,
            height_mode,
        })
    }

    fn merge_selected_cells(&mut self) -> SurfaceResult {
        self.record(Call::Merge)
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) -> SurfaceResult {
        self.record(Call::SetEmphasis(emphasis))
    }

    fn select_preceding_run(&mut self, chars: usize) -> SurfaceResult {
        self.record(Call::SelectPrecedingRun(chars))
    }

    fn probe_inside_table(&mut self) -> SurfaceResult<bool> {
        self.record(Call::ProbeInsideTable)?;
        Ok(self.inside_table)
    }
}
