//! Plain records for the board → list → card hierarchy and buttons
//!
//! Records carry persistence identity, display order and parent
//! reference only. Text fields hold the stored (encoded) form; see
//! [`super::codec`].

use serde::Serialize;

/// Row id assigned by the store on insert
pub type RowId = i64;

/// Sentinel for a card without a due date
pub const NO_DUE_DATE: i64 = -1;

/// The four kinds of stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Board,
    List,
    Card,
    Button,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Board => "board",
            EntityKind::List => "list",
            EntityKind::Card => "card",
            EntityKind::Button => "button",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub id: RowId,
    pub title: String,
    pub idx: i64,
}

/// A list inside a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub id: RowId,
    pub title: String,
    pub idx: i64,
    pub board_id: RowId,
}

/// A card inside a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: RowId,
    pub title: String,
    pub idx: i64,
    pub list_id: RowId,
    pub content: String,
    /// Epoch seconds, or [`NO_DUE_DATE`]
    pub due_date: i64,
}

/// A stored command shortcut
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub id: RowId,
    pub name: String,
    pub command: String,
    pub idx: i64,
}
