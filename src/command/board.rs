//! Board commands and navigation

use std::sync::LazyLock;

use regex::Regex;

use super::args::{self, SELECTOR};
use super::format::{Reply, Table};
use super::{CommandResult, Verb};
use crate::domain::{codec, Session};
use crate::storage::{Scope, Store};

static GOTO: LazyLock<Regex> = LazyLock::new(|| args::pattern(&format!("goto ({})", SELECTOR)));
static WHERE: LazyLock<Regex> = LazyLock::new(|| args::pattern("where"));
static ADD_BOARD: LazyLock<Regex> = LazyLock::new(|| args::pattern(r#"add-board "(.*)""#));
static SHOW_BOARDS: LazyLock<Regex> = LazyLock::new(|| args::pattern("show-boards"));

/// Title of the active board
pub fn where_(store: &Store, session: &Session, command: &str) -> CommandResult {
    args::capture(&WHERE, Verb::Where, command)?;
    let board = store.active_board(session)?;
    Ok(Reply::Text(codec::decode(&board.title)))
}

/// Moves the active-board pointer
pub fn goto(store: &Store, session: &mut Session, command: &str) -> CommandResult {
    let caps = args::capture(&GOTO, Verb::Goto, command)?;
    let selector = args::named(&caps, 1)?;

    let board = store.navigate(session, &selector)?;
    Ok(Reply::Text(format!(
        "Current board: {}",
        codec::decode(&board.title)
    )))
}

pub fn add_board(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&ADD_BOARD, Verb::AddBoard, command)?;
    let title = codec::encode(args::text(&caps, 1));

    let idx = store.next_index(Scope::Boards)?;
    let id = store.insert_board(&title, idx)?;

    tracing::debug!(id, idx, "added board");
    Ok(Reply::Done)
}

pub fn show_boards(store: &Store, command: &str) -> CommandResult {
    args::capture(&SHOW_BOARDS, Verb::ShowBoards, command)?;

    let mut table = Table::new(&["id", "title"]);
    for board in store.boards()? {
        table.push(vec![board.id.into(), board.title.into()]);
    }
    Ok(Reply::Table(table))
}
