//! # Command-Line Interface
//!
//! A thin shell around [`crate::command::Liszt`].
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create the database (seeded unless disabled) |
//! | `exec <command>` | Run one protocol command |
//! | `repl` | Read commands from stdin until `exit` (default) |
//! | `press <button>` | Expand a button template and run it |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - protocol text, tables as tab-separated lines
//! - `json` - tables as arrays of objects, values as `{"result": ...}`
//!
//! ## Verbose Mode
//!
//! `--verbose` prints CLI diagnostics and raises the log filter to
//! `liszt=debug`. `RUST_LOG` overrides the filter.

mod app;
mod output;
mod press;
mod repl;

pub use app::{run, Cli, Commands};
pub use output::Output;
