//! Liszt - boards, lists and cards behind a textual command protocol
//!
//! Every operation is a command string such as `add-card "Task":"":-1 to 1`
//! handed to [`Liszt::execute`]. Queries come back as tab-separated tables
//! with a header line; mutations come back empty. State lives in SQLite.

pub mod domain;
pub mod storage;
pub mod command;
pub mod cli;

pub use command::{CommandError, Liszt, Reply, Table, Verb};
pub use domain::{Board, Button, Card, List, RowId, Selector, Session};
pub use storage::{Store, StoreError};
