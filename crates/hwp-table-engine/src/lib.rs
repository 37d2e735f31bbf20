//! Table and cursor automation for word-processor documents.
//!
//! The host application's automation surface offers no random access: the
//! cursor only moves one cell at a time, relative to wherever it already is.
//! This crate turns absolute intents (write cell (3, 2), fill a column with
//! 1..=10, create a table with data, merge a block) into ordered primitive
//! sequences and runs them against an [`AutomationSurface`].
//!
//! # Architecture
//!
//! ```text
//! TableFactory / ColumnFiller / CellMerger / CellAddresser / TextStyler
//!     └── compile_* / *_steps  ->  Program or lazy Instruction iterator
//!           └── program::execute / program::run  ->  AutomationSurface
//!                 └── live document connection (e.g. hwp-bridge-client)
//! ```
//!
//! The cursor position is never read back from the host. It is simulated
//! forward, so a single failed primitive ends the operation. Operations on
//! one surface must not be interleaved.
//!
//! # Example
//!
//! ```rust
//! use hwp_table_engine::recording::RecordingSurface;
//! use hwp_table_engine::{TableData, TableDimensions, TableFactory};
//!
//! # fn main() -> hwp_table_engine::Result<()> {
//! let mut surface = RecordingSurface::new();
//! let data = TableData::from_json(r#"[["Name", "Score"], ["Kim", 90]]"#)?;
//! let outcome = TableFactory::new(&mut surface).create_with_data(
//!     TableDimensions::new(2, 2)?,
//!     Some(&data),
//!     true,
//! );
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod addresser;
pub mod column;
pub mod config;
pub mod error;
pub mod factory;
pub mod merge;
pub mod outcome;
pub mod program;
pub mod recording;
pub mod style;
pub mod surface;

pub use address::{CellAddress, MergeRange, TableData, TableDimensions};
pub use addresser::CellAddresser;
pub use column::ColumnFiller;
pub use config::EngineConfig;
pub use error::{EngineError, Result, SurfaceError};
pub use factory::{CreationStrategy, TableFactory, TableOrigin, TableReport};
pub use hwp_action_protocol::{Direction, Emphasis, FitMode};
pub use merge::CellMerger;
pub use outcome::{Outcome, OutcomeStatus, ERROR_MARKER};
pub use program::{Instruction, Program};
pub use style::TextStyler;
pub use surface::{AutomationSurface, SurfaceResult};
