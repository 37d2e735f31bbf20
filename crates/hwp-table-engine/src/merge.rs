//! Merging a rectangular block of cells.

use std::iter;

use hwp_action_protocol::Direction;

use crate::address::MergeRange;
use crate::outcome::Outcome;
use crate::program::{self, Instruction, Program};
use crate::surface::AutomationSurface;

/// The selection walk and merge for `range`.
///
/// The selection grows downward before it grows rightward. A single-cell
/// range still selects and merges.
pub fn merge_steps(range: &MergeRange) -> impl Iterator<Item = Instruction> {
    let (start, end) = (range.start, range.end);
    let moves =
        |instruction: Instruction, count: u32| iter::repeat(instruction).take(count as usize);
    iter::once(Instruction::MoveToTableOrigin)
        .chain(moves(Instruction::Move(Direction::Right), start.col() - 1))
        .chain(moves(Instruction::Move(Direction::Down), start.row() - 1))
        .chain(iter::once(Instruction::SelectCell))
        .chain(moves(
            Instruction::Extend(Direction::Down),
            end.row().saturating_sub(start.row()),
        ))
        .chain(moves(
            Instruction::Extend(Direction::Right),
            end.col().saturating_sub(start.col()),
        ))
        .chain(iter::once(Instruction::Merge))
}

/// Collect [`merge_steps`] into an inspectable program.
pub fn compile_merge(range: &MergeRange) -> Program {
    merge_steps(range).collect()
}

pub struct CellMerger<'a, S: AutomationSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: AutomationSurface + ?Sized> CellMerger<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self { surface }
    }

    pub fn merge(&mut self, range: MergeRange) -> Outcome {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return Outcome::failure(&e);
        }
        if let Err(e) = range.validate() {
            return Outcome::failure(&e);
        }

        match program::run(self.surface, merge_steps(&range)) {
            Ok(()) => {
                tracing::info!("Merged cells {} to {}", range.start, range.end);
                Outcome::success(format!(
                    "Merged cells {} to {} ({}x{})",
                    range.start,
                    range.end,
                    range.height(),
                    range.width()
                ))
            }
            Err(e) => {
                program::settle(self.surface);
                Outcome::failure_in("merging cells failed", &e)
            }
        }
    }
}
