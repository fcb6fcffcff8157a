//! List commands

use std::sync::LazyLock;

use regex::Regex;

use super::args::{self, SELECTOR};
use super::format::{Reply, Table};
use super::{CommandResult, Verb};
use crate::domain::{codec, EntityKind, List, Selector, Session};
use crate::storage::{Scope, Store, StoreResult};

static ADD_LIST: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r#"add-list "(.*)" to (\d+)"#));
static SHOW_LISTS: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(&format!("show-lists(?: ({}))?", SELECTOR)));
static MOVE_LIST: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(&format!("move-list ({0}) to ({0})", SELECTOR)));

pub fn add_list(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&ADD_LIST, Verb::AddList, command)?;
    let title = codec::encode(args::text(&caps, 1));
    let board_id = args::row_id(&caps, 2)?;

    store.board(board_id)?;
    let idx = store.next_index(Scope::Lists(board_id))?;
    let id = store.insert_list(&title, idx, board_id)?;

    tracing::debug!(id, board_id, idx, "added list");
    Ok(Reply::Done)
}

/// Lists of the named board, or of the active board when none is given
pub fn show_lists(store: &Store, session: &Session, command: &str) -> CommandResult {
    let caps = args::capture(&SHOW_LISTS, Verb::ShowLists, command)?;

    let board = match args::group(&caps, 1) {
        Some(_) => store.resolve_board(&args::named(&caps, 1)?)?,
        None => store.active_board(session)?,
    };

    let mut table = Table::new(&["id", "title", "cards"]);
    for list in store.lists_in(board.id)? {
        let count = store.card_count(list.id)?;
        table.push(vec![list.id.into(), list.title.into(), count.into()]);
    }
    Ok(Reply::Table(table))
}

/// Resolves a list selector. Titles are looked up in the active board;
/// ids resolve wherever the list lives.
pub(super) fn find_list(store: &Store, session: &Session, selector: &Selector) -> StoreResult<List> {
    match selector {
        Selector::Id(id) => store.list(*id),
        _ => {
            let active = store.active_board(session)?;
            store.resolve_list(selector, active.id)
        }
    }
}

/// Moves a list to the end of another board. A list title is looked up
/// in the active board. A list moved to its own board goes to the end.
pub fn move_list(store: &Store, session: &Session, command: &str) -> CommandResult {
    let caps = args::capture(&MOVE_LIST, Verb::MoveList, command)?;
    let list_selector = args::named(&caps, 1)?;
    let board_selector = args::named(&caps, 2)?;

    let list = find_list(store, session, &list_selector)?;
    let board = store.resolve_board(&board_selector)?;

    store.reparent(EntityKind::List, list.id, board.id)?;
    Ok(Reply::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandError;

    /// Board "Work" (1) with lists "Todo" (1) and "Done" (2), board "Home" (2)
    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let work = store.insert_board("Work", 0).unwrap();
        store.insert_board("Home", 1).unwrap();
        store.insert_list("Todo", 0, work).unwrap();
        store.insert_list("Done", 1, work).unwrap();
        store
    }

    #[test]
    fn add_list_appends_to_board() {
        let store = store();
        add_list(&store, "add-list \"Later\" to 1").unwrap();

        let lists = store.lists_in(1).unwrap();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[2].title, "Later");
        assert_eq!(lists[2].idx, 2);
    }

    #[test]
    fn add_list_to_missing_board_is_reference_error() {
        let store = store();
        assert!(matches!(
            add_list(&store, "add-list \"Later\" to 9"),
            Err(CommandError::Reference(_))
        ));
        assert!(store.lists_in(9).unwrap().is_empty());
    }

    #[test]
    fn show_lists_defaults_to_active_board() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();
        store.insert_card("B", 1, 1, "", -1).unwrap();

        let reply = show_lists(&store, &Session::new(), "show-lists").unwrap();

        assert_eq!(reply.render(), "id\ttitle\tcards\n1\tTodo\t2\n2\tDone\t0\n");
    }

    #[test]
    fn show_lists_of_named_board() {
        let store = store();
        store.insert_list("Chores", 0, 2).unwrap();

        let by_title = show_lists(&store, &Session::new(), "show-lists \"Home\"").unwrap();
        let by_id = show_lists(&store, &Session::new(), "show-lists 2").unwrap();

        assert_eq!(by_title.render(), "id\ttitle\tcards\n3\tChores\t0\n");
        assert_eq!(by_title, by_id);
    }

    #[test]
    fn show_lists_of_empty_board_has_header_only() {
        let store = store();
        let reply = show_lists(&store, &Session::new(), "show-lists 2").unwrap();
        assert_eq!(reply.render(), "id\ttitle\tcards\n");
    }

    #[test]
    fn show_lists_bare_word_is_unsupported() {
        let store = store();
        assert!(matches!(
            show_lists(&store, &Session::new(), "show-lists Home"),
            Err(CommandError::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn move_list_by_title_appends_to_destination() {
        let store = store();
        store.insert_list("Chores", 0, 2).unwrap();

        move_list(&store, &Session::new(), "move-list \"Todo\" to \"Home\"").unwrap();

        let moved = store.list(1).unwrap();
        assert_eq!(moved.board_id, 2);
        assert_eq!(moved.idx, 1);
        // Vacated board keeps its gap until reindexed
        assert_eq!(store.list(2).unwrap().idx, 1);
    }

    #[test]
    fn move_list_by_id_ignores_active_board() {
        let store = store();
        let chores = store.insert_list("Chores", 0, 2).unwrap();

        move_list(&store, &Session::new(), &format!("move-list {} to 1", chores)).unwrap();

        assert_eq!(store.list(chores).unwrap().board_id, 1);
        assert_eq!(store.list(chores).unwrap().idx, 2);
    }

    #[test]
    fn move_list_to_missing_board_is_reference_error() {
        let store = store();
        assert!(matches!(
            move_list(&store, &Session::new(), "move-list 1 to \"Nowhere\""),
            Err(CommandError::Reference(_))
        ));
        assert_eq!(store.list(1).unwrap().board_id, 1);
    }

    #[test]
    fn move_list_to_own_board_goes_to_end() {
        let store = store();
        move_list(&store, &Session::new(), "move-list 1 to 1").unwrap();
        assert_eq!(store.sibling_ids(Scope::Lists(1)).unwrap(), vec![2, 1]);
    }

    #[test]
    fn move_list_relative_target_is_unsupported() {
        let store = store();
        assert!(matches!(
            move_list(&store, &Session::new(), "move-list 1 to next"),
            Err(CommandError::UnsupportedSelector(_))
        ));
    }
}
