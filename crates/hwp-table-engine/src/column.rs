//! Numbering a table column top to bottom.

use std::iter;

use hwp_action_protocol::Direction;

use crate::error::EngineError;
use crate::outcome::Outcome;
use crate::program::{self, Instruction, Program};
use crate::surface::AutomationSurface;

/// The vertical walk writing `start..=end` into `column`, produced lazily.
///
/// `start > end` yields only the positioning moves. With `from_first_cell`
/// false the walk begins one row down, below a header row.
pub fn column_fill_steps(
    start: i64,
    end: i64,
    column: u32,
    from_first_cell: bool,
) -> impl Iterator<Item = Instruction> {
    let header_skip = (!from_first_cell).then_some(Instruction::Move(Direction::Down));
    let positioning = iter::once(Instruction::MoveToTableOrigin)
        .chain(header_skip)
        .chain(
            iter::repeat(Instruction::Move(Direction::Right))
                .take(column.saturating_sub(1) as usize),
        );

    let writes = (start..=end).flat_map(move |n| {
        let down = (n < end).then_some(Instruction::Move(Direction::Down));
        [
            Instruction::SelectCell,
            Instruction::Delete,
            Instruction::Insert(n.to_string()),
        ]
        .into_iter()
        .chain(down)
    });
    positioning.chain(writes)
}

/// Collect [`column_fill_steps`] into an inspectable program.
pub fn compile_column_fill(start: i64, end: i64, column: u32, from_first_cell: bool) -> Program {
    column_fill_steps(start, end, column, from_first_cell).collect()
}

/// Writes integer sequences down a single column.
pub struct ColumnFiller<'a, S: AutomationSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: AutomationSurface + ?Sized> ColumnFiller<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self { surface }
    }

    pub fn fill_column(
        &mut self,
        start: i64,
        end: i64,
        column: u32,
        from_first_cell: bool,
    ) -> Outcome {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return Outcome::failure(&e);
        }
        if column == 0 {
            return Outcome::failure(&EngineError::invalid_input("column must be >= 1"));
        }

        let steps = column_fill_steps(start, end, column, from_first_cell);
        if let Err(e) = program::run(self.surface, steps) {
            program::settle(self.surface);
            return Outcome::failure_in(&format!("filling column {column} failed"), &e);
        }

        if start > end {
            tracing::debug!("Empty number range {start}..={end}, nothing written");
            Outcome::success(format!(
                "Nothing to fill in column {column}: start {start} is after end {end}"
            ))
        } else {
            tracing::info!("Filled column {column} with {start}..={end}");
            Outcome::success(format!("Filled column {column} with numbers {start} to {end}"))
        }
    }
}
