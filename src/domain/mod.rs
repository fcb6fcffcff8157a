//! Domain models for Liszt
//!
//! Plain records, selectors, text encoding and session state. Nothing in
//! here touches the database.

pub mod codec;
mod due;
mod records;
mod selector;
mod session;
mod template;

pub use due::{DueInterval, DueUnit, IntervalError};
pub use records::{Board, Button, Card, EntityKind, List, RowId, NO_DUE_DATE};
pub use selector::{Selector, SelectorError, Step};
pub use session::Session;
pub use template::{ButtonTemplate, CARD_PLACEHOLDER, LIST_PLACEHOLDER};
