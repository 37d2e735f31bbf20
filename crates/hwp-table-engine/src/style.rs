//! Emphasized text insertion.

use hwp_action_protocol::Emphasis;

use crate::outcome::Outcome;
use crate::program::{self, Instruction, Program};
use crate::surface::AutomationSurface;

/// Insert `text`, then select it back and apply `emphasis`.
pub fn compile_emphasized(text: &str, emphasis: Emphasis) -> Program {
    let mut program = Program::new();
    if text.is_empty() {
        return program;
    }
    program.push(Instruction::Insert(text.to_string()));
    if !emphasis.is_empty() {
        program
            .push(Instruction::SelectPrecedingRun(text.chars().count()))
            .push(Instruction::SetEmphasis(emphasis))
            .push(Instruction::CancelSelection);
    }
    program
}

pub struct TextStyler<'a, S: AutomationSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: AutomationSurface + ?Sized> TextStyler<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self { surface }
    }

    pub fn insert_emphasized(&mut self, text: &str, emphasis: Emphasis) -> Outcome {
        if let Err(e) = program::ensure_connected(&*self.surface) {
            return Outcome::failure(&e);
        }
        match program::execute(self.surface, &compile_emphasized(text, emphasis)) {
            Ok(()) => Outcome::success(format!("Inserted {} characters", text.chars().count())),
            Err(e) => {
                program::settle(self.surface);
                Outcome::failure_in("inserting text failed", &e)
            }
        }
    }
}
