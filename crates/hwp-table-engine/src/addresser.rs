//! Absolute cell addressing on top of relative cursor motion.
//!
//! The host can only jump to a table's upper-left cell; every other cell is
//! reached by counting single-cell moves from there. Columns are walked
//! before rows.

use std::iter;

use hwp_action_protocol::Direction;

use crate::address::CellAddress;
use crate::outcome::Outcome;
use crate::program::{self, Instruction, Program};
use crate::surface::AutomationSurface;

/// The moves that bring the cursor from anywhere in a table to `target`.
///
/// With `anchor_at_origin` false, one extra downward move follows the
/// anchor step so row 1 refers to the row below an occupied header row.
pub fn move_to_steps(
    target: CellAddress,
    anchor_at_origin: bool,
) -> impl Iterator<Item = Instruction> {
    let header_skip = (!anchor_at_origin).then_some(Instruction::Move(Direction::Down));
    let moves =
        |direction: Direction, count: u32| iter::repeat(Instruction::Move(direction)).take(count as usize);
    iter::once(Instruction::MoveToTableOrigin)
        .chain(header_skip)
        .chain(moves(Direction::Right, target.col() - 1))
        .chain(moves(Direction::Down, target.row() - 1))
}

/// Collect [`move_to_steps`] into an inspectable program.
pub fn compile_move_to(target: CellAddress, anchor_at_origin: bool) -> Program {
    move_to_steps(target, anchor_at_origin).collect()
}

/// Moves the cursor to absolute cells of the table it is in.
pub struct CellAddresser<'a, S: AutomationSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: AutomationSurface + ?Sized> CellAddresser<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self { surface }
    }

    /// Position the cursor on `target`.
    pub fn move_to(&mut self, target: CellAddress, anchor_at_origin: bool) -> Outcome {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return Outcome::failure(&e);
        }

        // No retry here; a failed move leaves the cursor somewhere unknown.
        match program::run(self.surface, move_to_steps(target, anchor_at_origin)) {
            Ok(()) => Outcome::success(format!("Cursor moved to cell {target}")),
            Err(e) => Outcome::failure(&e),
        }
    }

    /// Position the cursor on `target` and replace the cell's contents.
    pub fn write_cell(&mut self, target: CellAddress, text: &str, anchor_at_origin: bool) -> Outcome {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return Outcome::failure(&e);
        }

        let steps = move_to_steps(target, anchor_at_origin).chain([
            Instruction::SelectCell,
            Instruction::Delete,
            Instruction::Insert(text.to_string()),
        ]);
        match program::run(self.surface, steps) {
            Ok(()) => Outcome::success(format!("Wrote cell {target}")),
            Err(e) => {
                program::settle(self.surface);
                Outcome::failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use crate::recording::{Call, Primitive, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn addr(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col).unwrap()
    }

    #[test]
    fn test_columns_before_rows() {
        let program = compile_move_to(addr(3, 2), true);
        assert_eq!(
            program.steps(),
            &[
                Instruction::MoveToTableOrigin,
                Instruction::Move(Direction::Right),
                Instruction::Move(Direction::Down),
                Instruction::Move(Direction::Down),
            ]
        );
    }

    #[test]
    fn test_origin_is_anchor_only() {
        let program = compile_move_to(CellAddress::origin(), true);
        assert_eq!(program.steps(), &[Instruction::MoveToTableOrigin]);

        let mut surface = RecordingSurface::new();
        let outcome = CellAddresser::new(&mut surface).move_to(CellAddress::origin(), true);
        assert!(outcome.is_success());
        assert_eq!(surface.calls(), &[Call::MoveToTableOrigin]);
    }

    #[test]
    fn test_header_offset_adds_one_down() {
        let program = compile_move_to(addr(1, 2), false);
        assert_eq!(
            program.steps(),
            &[
                Instruction::MoveToTableOrigin,
                Instruction::Move(Direction::Down),
                Instruction::Move(Direction::Right),
            ]
        );
    }

    #[test]
    fn test_write_cell() {
        let mut surface = RecordingSurface::new();
        let outcome = CellAddresser::new(&mut surface).write_cell(addr(2, 1), "hello", true);
        assert!(outcome.is_success(), "{outcome}");
        assert_eq!(
            surface.calls(),
            &[
                Call::MoveToTableOrigin,
                Call::Move(Direction::Down),
                Call::SelectCell,
                Call::Delete,
                Call::Insert("hello".into()),
            ]
        );
    }

    #[test]
    fn test_failed_move_aborts_and_reports() {
        let mut surface = RecordingSurface::new();
        surface.fail_nth(
            Primitive::MoveCursor,
            1,
            SurfaceError::InvalidState("not in table".into()),
        );
        let outcome = CellAddresser::new(&mut surface).move_to(addr(4, 4), true);
        assert!(!outcome.is_success());
        assert!(outcome.message.starts_with("Error:"));
        assert_eq!(surface.count(Primitive::MoveCursor), 1);
    }

    #[test]
    fn test_far_cell_fails_on_first_move() {
        let mut surface = RecordingSurface::new();
        surface.fail_nth(Primitive::MoveCursor, 1, SurfaceError::Busy);
        let far = addr(u32::MAX, u32::MAX);
        let outcome = CellAddresser::new(&mut surface).write_cell(far, "x", true);
        assert!(!outcome.is_success());
        assert_eq!(
            surface.calls(),
            &[
                Call::MoveToTableOrigin,
                Call::Move(Direction::Right),
                Call::CancelSelection,
            ]
        );
    }

    #[test]
    fn test_not_connected_issues_nothing() {
        let mut surface = RecordingSurface::disconnected();
        let outcome = CellAddresser::new(&mut surface).write_cell(addr(1, 1), "x", true);
        assert_eq!(outcome.message, "Error: not connected to the document");
        assert!(surface.calls().is_empty());
    }
}
