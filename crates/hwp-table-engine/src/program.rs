//! Compiled primitive sequences and the interpreter that runs them.
//!
//! Higher-level intents are first compiled into a [`Program`], a flat list
//! of cursor-relative [`Instruction`]s. Compilation is pure, so a program
//! can be inspected without a live document. [`execute`] then replays it
//! against an [`AutomationSurface`] and stops at the first failure, since
//! the simulated cursor position cannot be trusted past that point.
//! Walks whose length depends on caller-supplied numbers go through [`run`]
//! instead, which pulls instructions from an iterator one at a time.

use std::fmt;

use hwp_action_protocol::{Direction, Emphasis};

use crate::error::{EngineError, Result};
use crate::surface::{AutomationSurface, SurfaceResult};

/// One cursor-relative primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    MoveToTableOrigin,
    Move(Direction),
    SelectCell,
    Extend(Direction),
    CancelSelection,
    Delete,
    Insert(String),
    SetEmphasis(Emphasis),
    SelectPrecedingRun(usize),
    Merge,
}

impl Instruction {
    fn apply<S: AutomationSurface + ?Sized>(&self, surface: &mut S) -> SurfaceResult {
        match self {
            Instruction::MoveToTableOrigin => surface.move_to_table_origin(),
            Instruction::Move(direction) => surface.move_cursor(*direction),
            Instruction::SelectCell => surface.select_current_cell(),
            Instruction::Extend(direction) => surface.extend_selection(*direction),
            Instruction::CancelSelection => surface.cancel_selection(),
            Instruction::Delete => surface.delete_selection(),
            Instruction::Insert(text) => surface.insert_text(text),
            Instruction::SetEmphasis(emphasis) => surface.set_emphasis(*emphasis),
            Instruction::SelectPrecedingRun(chars) => surface.select_preceding_run(*chars),
            Instruction::Merge => surface.merge_selected_cells(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveToTableOrigin => write!(f, "move to table origin"),
            Instruction::Move(direction) => write!(f, "move {direction}"),
            Instruction::SelectCell => write!(f, "select cell"),
            Instruction::Extend(direction) => write!(f, "extend selection {direction}"),
            Instruction::CancelSelection => write!(f, "cancel selection"),
            Instruction::Delete => write!(f, "delete selection"),
            Instruction::Insert(text) => write!(f, "insert {text:?}"),
            Instruction::SetEmphasis(emphasis) => write!(f, "set emphasis {emphasis:?}"),
            Instruction::SelectPrecedingRun(chars) => write!(f, "select {chars} preceding chars"),
            Instruction::Merge => write!(f, "merge cells"),
        }
    }
}

/// An ordered list of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    steps: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.steps.push(instruction);
        self
    }

    /// Append `count` copies of a motion.
    pub fn repeat(&mut self, instruction: Instruction, count: u32) -> &mut Self {
        for _ in 0..count {
            self.steps.push(instruction.clone());
        }
        self
    }

    /// Append another program.
    pub fn extend(&mut self, other: Program) -> &mut Self {
        self.steps.extend(other.steps);
        self
    }

    /// Select the current cell, clear it, and type `text`.
    pub fn overwrite_cell(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Instruction::SelectCell)
            .push(Instruction::Delete)
            .push(Instruction::Insert(text.into()))
    }

    pub fn steps(&self) -> &[Instruction] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps matching a predicate.
    pub fn count(&self, pred: impl Fn(&Instruction) -> bool) -> usize {
        self.steps.iter().filter(|step| pred(step)).count()
    }

    /// The last emphasis change strictly before step `index`, if any.
    pub fn last_emphasis_before(&self, index: usize) -> Option<Emphasis> {
        self.steps[..index.min(self.steps.len())]
            .iter()
            .rev()
            .find_map(|step| match step {
                Instruction::SetEmphasis(emphasis) => Some(*emphasis),
                _ => None,
            })
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Run a program, stopping at the first failing primitive.
pub fn execute<S: AutomationSurface + ?Sized>(surface: &mut S, program: &Program) -> Result<()> {
    tracing::debug!("Executing program of {} steps", program.len());
    run(surface, program.steps.iter().cloned())
}

/// Run instructions as they are produced, stopping at the first failing
/// primitive. Nothing past the failure is ever generated.
pub fn run<S, I>(surface: &mut S, steps: I) -> Result<()>
where
    S: AutomationSurface + ?Sized,
    I: IntoIterator<Item = Instruction>,
{
    for (index, step) in steps.into_iter().enumerate() {
        tracing::trace!("step {index}: {step}");
        if let Err(source) = step.apply(surface) {
            tracing::warn!("Primitive failed at step {index} ({step}): {source}");
            return Err(EngineError::Primitive {
                index,
                step: step.to_string(),
                source,
            });
        }
    }
    Ok(())
}

/// Fail fast when the connection is gone.
pub(crate) fn ensure_connected<S: AutomationSurface + ?Sized>(surface: &S) -> Result<()> {
    if surface.is_connected() {
        Ok(())
    } else {
        Err(EngineError::NotConnected)
    }
}

/// Best-effort cleanup after a failed program: drop any stray selection so
/// later edits do not land on it.
pub(crate) fn settle<S: AutomationSurface + ?Sized>(surface: &mut S) {
    if let Err(e) = surface.cancel_selection() {
        tracing::warn!("Could not cancel selection after failure: {e}");
    }
}
