//! # Storage Layer
//!
//! SQLite persistence for boards, lists, cards and buttons.
//!
//! ## Tables
//!
//! | Table | Columns | Parent |
//! |-------|---------|--------|
//! | `boards` | id, title, idx | - |
//! | `lists` | id, title, idx, board_id | board |
//! | `cards` | id, title, idx, list_id, content, due_date | list |
//! | `buttons` | id, name, command, idx | - |
//!
//! Parent references are plain ids. Nothing cascades in the database;
//! [`Store::delete`] sweeps orphans itself.
//!
//! ## Key Types
//!
//! - [`Store`] - Connection, schema, row reads/writes, manual commit
//! - [`Scope`] - A sibling set for ordering operations
//! - [`Sweep`] - Rows removed by an orphan sweep
//! - [`Config`] - User configuration

mod config;
mod hierarchy;
mod ordering;
mod store;

pub use config::{Config, ConfigError, OutputFormat};
pub use hierarchy::Sweep;
pub use ordering::Scope;
pub use store::{Store, StoreError, StoreResult};
