//! The primitive operations the engine compiles down to.

use hwp_action_protocol::{Direction, Emphasis, FitMode};

use crate::error::SurfaceError;

pub type SurfaceResult<T = ()> = std::result::Result<T, SurfaceError>;

/// A live, cursor-bearing document connection.
///
/// Every method acts on the host's single cursor, so calls must be strictly
/// serialized: the engine never reads the cursor position back and relies on
/// each call landing where the previous one left it.
pub trait AutomationSurface {
    /// Whether the connection to the host is usable.
    fn is_connected(&self) -> bool {
        true
    }

    /// Jump to the upper-left cell of the table containing the cursor.
    fn move_to_table_origin(&mut self) -> SurfaceResult;

    fn move_cursor(&mut self, direction: Direction) -> SurfaceResult;

    fn select_current_cell(&mut self) -> SurfaceResult;

    fn extend_selection(&mut self, direction: Direction) -> SurfaceResult;

    fn cancel_selection(&mut self) -> SurfaceResult;

    fn delete_selection(&mut self) -> SurfaceResult;

    fn insert_text(&mut self, text: &str) -> SurfaceResult;

    /// Create a table with one opaque host instruction.
    fn create_table_fast(&mut self, rows: u32, cols: u32) -> SurfaceResult;

    /// Create a table from an explicit parameter set. Column widths are left
    /// at the host default.
    fn create_table_structured(
        &mut self,
        rows: u32,
        cols: u32,
        width_mode: FitMode,
        height_mode: FitMode,
    ) -> SurfaceResult;

    fn merge_selected_cells(&mut self) -> SurfaceResult;

    fn set_emphasis(&mut self, emphasis: Emphasis) -> SurfaceResult;

    /// Select the `chars` characters immediately before the cursor.
    fn select_preceding_run(&mut self, chars: usize) -> SurfaceResult;

    /// Report whether the cursor sits inside a table.
    ///
    /// Implementations must cancel whatever selection they used to find out.
    fn probe_inside_table(&mut self) -> SurfaceResult<bool>;
}

impl<S: AutomationSurface + ?Sized> AutomationSurface for &mut S {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn move_to_table_origin(&mut self) -> SurfaceResult {
        (**self).move_to_table_origin()
    }

    fn move_cursor(&mut self, direction: Direction) -> SurfaceResult {
        (**self).move_cursor(direction)
    }

    fn select_current_cell(&mut self) -> SurfaceResult {
        (**self).select_current_cell()
    }

    fn extend_selection(&mut self, direction: Direction) -> SurfaceResult {
        (**self).extend_selection(direction)
    }

    fn cancel_selection(&mut self) -> SurfaceResult {
        (**self).cancel_selection()
    }

    fn delete_selection(&mut self) -> SurfaceResult {
        (**self).delete_selection()
    }

    fn insert_text(&mut self, text: &str) -> SurfaceResult {
        (**self).insert_text(text)
    }

    fn create_table_fast(&mut self, rows: u32, cols: u32) -> SurfaceResult {
        (**self).create_table_fast(rows, cols)
    }

    fn create_table_structured(
        &mut self,
        rows: u32,
        cols: u32,
        width_mode: FitMode,
        height_mode: FitMode,
    ) -> SurfaceResult {
        (**self).create_table_structured(rows, cols, width_mode, height_mode)
    }

    fn merge_selected_cells(&mut self) -> SurfaceResult {
        (**self).merge_selected_cells()
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) -> SurfaceResult {
        (**self).set_emphasis(emphasis)
    }

    fn select_preceding_run(&mut self, chars: usize) -> SurfaceResult {
        (**self).select_preceding_run(chars)
    }

    fn probe_inside_table(&mut self) -> SurfaceResult<bool> {
        (**self).probe_inside_table()
    }
}
