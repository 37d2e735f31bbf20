//! Client side of the word-processor automation bridge.
//!
//! The host process owns the live document and exposes cursor-relative
//! primitives over newline-delimited JSON. [`BridgeSurface`] speaks that
//! protocol and implements [`hwp_table_engine::AutomationSurface`], so any
//! engine component can drive a real document through it.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── TableFactory / ColumnFiller / CellMerger (hwp-table-engine)
//!           └── BridgeSurface (this crate)
//!                 └── stdin/stdout of the host bridge process
//!                       └── word-processor automation object
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::io::BufReader;
//! use std::process::{Command, Stdio};
//!
//! use hwp_bridge_client::BridgeSurface;
//! use hwp_table_engine::{ColumnFiller, TableDimensions, TableFactory};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut child = Command::new("hwp-host-bridge.exe")
//!         .stdin(Stdio::piped())
//!         .stdout(Stdio::piped())
//!         .spawn()?;
//!     let stdin = child.stdin.take().ok_or("no stdin")?;
//!     let stdout = BufReader::new(child.stdout.take().ok_or("no stdout")?);
//!
//!     let mut surface = BridgeSurface::new(stdout, stdin);
//!     let outcome = TableFactory::new(&mut surface)
//!         .create_with_data(TableDimensions::new(5, 2)?, None, false);
//!     println!("{outcome}");
//!     println!("{}", ColumnFiller::new(&mut surface).fill_column(1, 5, 1, true));
//!     Ok(())
//! }
//! ```

mod bridge;

pub use bridge::{BridgeClientConfig, BridgeError, BridgeSurface};
pub use hwp_action_protocol::{Action, Request, Response};
