//! # Command Router
//!
//! Turns one command string into one reply. The verb is found by prefix
//! match against [`Verb::ALL`]; the whole string then goes to that verb's
//! handler, which parses its own arguments.
//!
//! ```text
//! command ──▶ Verb::match_command ──▶ dispatch ──▶ handler ──▶ Reply
//!                    │                                │
//!                    └─ ParseError (no handler runs)  └─ Store::commit
//! ```
//!
//! Every handler invocation is followed by a commit, whether it succeeded
//! or not. A handler that fails halfway keeps the writes it made.

mod args;
mod board;
mod button;
mod card;
mod format;
mod list;
mod rows;
mod verb;

use std::path::Path;

use thiserror::Error;

use crate::domain::{EntityKind, SelectorError, Session};
use crate::storage::{Store, StoreError};

pub use format::{Cell, Reply, Table};
pub use verb::Verb;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Reference error: {0}")]
    Reference(String),

    #[error("{0}")]
    UnsupportedSelector(String),

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    Storage(#[source] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Reference(msg) => CommandError::Reference(msg),
            StoreError::Unsupported(selector) => CommandError::UnsupportedSelector(
                SelectorError::Unsupported(selector).to_string(),
            ),
            StoreError::Integrity(msg) => CommandError::Integrity(msg),
            StoreError::Sqlite(err) => CommandError::Storage(err),
            StoreError::Io(err) => CommandError::Io(err),
        }
    }
}

impl From<SelectorError> for CommandError {
    fn from(err: SelectorError) -> Self {
        match err {
            SelectorError::OutOfRange(_) => CommandError::Parse(err.to_string()),
            SelectorError::Unsupported(_) => CommandError::UnsupportedSelector(err.to_string()),
        }
    }
}

pub type CommandResult = Result<Reply, CommandError>;

/// Routes a matched command to its handler
pub fn dispatch(store: &Store, session: &mut Session, verb: Verb, command: &str) -> CommandResult {
    use EntityKind::{Board, Button, Card, List};

    match verb {
        Verb::Where => board::where_(store, session, command),
        Verb::Goto => board::goto(store, session, command),

        Verb::AddCard => card::add_card(store, session, command),
        Verb::AddList => list::add_list(store, command),
        Verb::AddBoard => board::add_board(store, command),
        Verb::AddButton => button::add_button(store, command),

        Verb::SetCardContent => card::set_card_content(store, command),
        Verb::GetCardContent => card::get_card_content(store, command),

        Verb::SetDueDate => card::set_due_date(store, command),
        Verb::GetDueDate => card::get_due_date(store, command),
        Verb::SetDueIn => card::set_due_in(store, command),
        Verb::MoveDueCards => card::move_due_cards(store, command),

        Verb::ShowCards => card::show_cards(store, session, command),
        Verb::ShowLists => list::show_lists(store, session, command),
        Verb::ShowBoards => board::show_boards(store, command),
        Verb::ShowButtons => button::show_buttons(store, command),

        Verb::GetButton => button::get_button(store, command),

        Verb::RenameButton => button::rename_button(store, command),
        Verb::RenameBoard => rows::rename(store, Board, verb, command),
        Verb::RenameList => rows::rename(store, List, verb, command),
        Verb::RenameCard => rows::rename(store, Card, verb, command),

        Verb::MoveCard => card::move_card(store, session, command),
        Verb::MoveList => list::move_list(store, session, command),

        Verb::ShiftCard => rows::shift(store, Card, verb, command),
        Verb::ShiftList => rows::shift(store, List, verb, command),
        Verb::ShiftBoard => rows::shift(store, Board, verb, command),
        Verb::ShiftButton => rows::shift(store, Button, verb, command),

        Verb::DeleteCard => rows::delete(store, Card, verb, command),
        Verb::DeleteList => rows::delete(store, List, verb, command),
        Verb::DeleteBoard => rows::delete(store, Board, verb, command),
        Verb::DeleteButton => rows::delete(store, Button, verb, command),
    }
}

/// A store plus the session that navigates it
pub struct Liszt {
    store: Store,
    session: Session,
}

impl Liszt {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            session: Session::new(),
        }
    }

    /// Opens the database at `path`, seeding a fresh one if `seed` is set
    pub fn open(path: &Path, seed: bool) -> Result<Self, CommandError> {
        let mut store = Store::open(path)?;
        if seed && store.is_fresh() {
            store.seed_defaults()?;
        }
        Ok(Self::new(store))
    }

    pub fn open_in_memory() -> Result<Self, CommandError> {
        Ok(Self::new(Store::open_in_memory()?))
    }

    /// Runs one command and commits
    pub fn execute(&mut self, command: &str) -> CommandResult {
        let verb = Verb::match_command(command)
            .ok_or_else(|| CommandError::Parse(format!("unknown command '{}'", command)))?;

        tracing::debug!(%verb, "dispatch");
        let result = dispatch(&self.store, &mut self.session, verb, command);

        if let Err(err) = &result {
            tracing::debug!(%verb, error = %err, "command failed");
        }

        self.store.commit()?;
        result
    }

    /// Runs one command and renders the reply as protocol text
    pub fn run_command(&mut self, command: &str) -> Result<String, CommandError> {
        Ok(self.execute(command)?.render())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded() -> Liszt {
        let mut store = Store::open_in_memory().unwrap();
        store.seed_defaults().unwrap();
        Liszt::new(store)
    }

    #[test]
    fn unknown_command_is_parse_error() {
        let mut liszt = seeded();
        let err = liszt.execute("launch-rocket").unwrap_err();
        assert!(matches!(err, CommandError::Parse(_)));
        assert!(err.to_string().contains("unknown command"));
    }

    #[test]
    fn work_board_scenario() {
        let mut liszt = Liszt::open_in_memory().unwrap();

        liszt.execute("add-board \"Work\"").unwrap();
        liszt.execute("add-list \"Todo\" to 1").unwrap();
        liszt.execute("add-card \"Task A\":\"\":-1 to 1").unwrap();

        assert_eq!(
            liszt.run_command("show-cards 1").unwrap(),
            "id\tdue\ttitle\tcontent\n1\t-1\tTask A\t\n"
        );
    }

    #[test]
    fn shift_card_reorders_show_cards() {
        let mut liszt = seeded();
        liszt.execute("add-card \"A\":\"\":-1 to 1").unwrap();
        liszt.execute("add-card \"B\":\"\":-1 to 1").unwrap();

        liszt.execute("shift-card 2 to 0").unwrap();

        assert_eq!(
            liszt.run_command("show-cards \"To do\"").unwrap(),
            "id\tdue\ttitle\tcontent\n2\t-1\tB\t\n1\t-1\tA\t\n"
        );
    }

    #[test]
    fn goto_changes_where() {
        let mut liszt = seeded();
        liszt.execute("add-board \"Work\"").unwrap();

        assert_eq!(liszt.run_command("where").unwrap(), "Personal");
        assert_eq!(
            liszt.run_command("goto \"Work\"").unwrap(),
            "Current board: Work"
        );
        assert_eq!(liszt.run_command("where").unwrap(), "Work");
        assert_eq!(liszt.session().active_board(), 1);
    }

    #[test]
    fn deleting_board_cascades() {
        let mut liszt = seeded();
        liszt.execute("add-card \"A\":\"\":-1 to 1").unwrap();
        liszt.execute("add-card \"B\":\"\":-1 to 3").unwrap();

        liszt.execute("delete-board 1").unwrap();

        assert!(liszt.store().boards().unwrap().is_empty());
        assert!(liszt.store().lists_in(1).unwrap().is_empty());
        assert!(liszt.store().cards_in(1).unwrap().is_empty());
        assert!(liszt.store().cards_in(3).unwrap().is_empty());
    }

    #[test]
    fn error_taxonomy_reaches_caller() {
        let mut liszt = seeded();

        assert!(matches!(
            liszt.execute("goto Personal"),
            Err(CommandError::UnsupportedSelector(_))
        ));
        assert!(matches!(
            liszt.execute("goto \"Nowhere\""),
            Err(CommandError::Reference(_))
        ));
        assert!(matches!(
            liszt.execute("add-card \"A\":\"\":-9 to 1"),
            Err(CommandError::Integrity(_))
        ));
        assert!(matches!(
            liszt.execute("shift-card one to 0"),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn oversized_id_selector_is_parse_error() {
        let mut liszt = seeded();

        let err = liszt.execute("goto 99999999999999999999").unwrap_err();
        assert!(matches!(err, CommandError::Parse(_)));
        assert!(err.to_string().contains("out of range"));
        assert!(matches!(
            liszt.execute("show-cards 99999999999999999999"),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn failed_command_does_not_block_next() {
        let mut liszt = seeded();
        assert!(liszt.execute("delete-card 42").is_err());
        assert_eq!(liszt.run_command("where").unwrap(), "Personal");
    }

    #[test]
    fn every_verb_routes_to_its_own_grammar() {
        let mut liszt = seeded();
        for verb in Verb::ALL {
            // A bare keyword either runs or fails on its own arguments,
            // never as an unknown command
            if let Err(CommandError::Parse(msg)) = liszt.execute(verb.keyword()) {
                assert!(msg.contains(verb.keyword()), "{}: {}", verb, msg);
            }
        }
    }

    #[test]
    fn commands_are_durable_after_execute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liszt.db");

        {
            let mut liszt = Liszt::open(&path, true).unwrap();
            liszt.execute("add-board \"Work\"").unwrap();
        }

        let mut liszt = Liszt::open(&path, true).unwrap();
        assert_eq!(
            liszt.run_command("show-boards").unwrap(),
            "id\ttitle\n1\tPersonal\n2\tWork\n"
        );
    }
}
