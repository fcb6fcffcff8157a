//! Card commands
//!
//! Cards carry free text (title and content, both encoded before
//! storage) and an optional due date in epoch seconds, `-1` when unset.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use super::args::{self, SELECTOR};
use super::format::{Reply, Table};
use super::list::find_list;
use super::{CommandError, CommandResult, Verb};
use crate::domain::{codec, DueInterval, EntityKind, RowId, Selector, Session, Step, NO_DUE_DATE};
use crate::storage::{Scope, Store};

static ADD_CARD: LazyLock<Regex> = LazyLock::new(|| {
    args::pattern(&format!(r#"add-card "(.*)":"(.*)":(-?\d*) to ({})"#, SELECTOR))
});
static SET_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r#"set-card-content (\d+) "(.*)""#));
static GET_CONTENT: LazyLock<Regex> = LazyLock::new(|| args::pattern(r"get-card-content (\d+)"));
static SET_DUE_DATE: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r"set-due-date (\d+) (-?\d+)"));
static GET_DUE_DATE: LazyLock<Regex> = LazyLock::new(|| args::pattern(r"get-due-date (\d+)"));
static SET_DUE_IN: LazyLock<Regex> = LazyLock::new(|| args::pattern(r"set-due-in (\d+) (\S+)"));
static MOVE_DUE: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r"move-due-cards (\d+(?:\s*,\s*\d+)*) to (\d+)"));
static SHOW_CARDS: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(&format!("show-cards ({})", SELECTOR)));
static MOVE_CARD: LazyLock<Regex> = LazyLock::new(|| {
    args::pattern(&format!(r"move-card (\d+) to ({0})(?: in ({0}))?", SELECTOR))
});

pub fn add_card(store: &Store, session: &Session, command: &str) -> CommandResult {
    let caps = args::capture(&ADD_CARD, Verb::AddCard, command)?;
    let title = codec::encode(args::text(&caps, 1));
    let content = codec::encode(args::text(&caps, 2));
    let due_date = match args::text(&caps, 3) {
        "" => NO_DUE_DATE,
        _ => args::number(&caps, 3)?,
    };

    let list = find_list(store, session, &args::named(&caps, 4)?)?;
    let idx = store.next_index(Scope::Cards(list.id))?;
    let id = store.insert_card(&title, idx, list.id, &content, due_date)?;

    tracing::debug!(id, list = list.id, idx, "added card");
    Ok(Reply::Done)
}

pub fn set_card_content(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&SET_CONTENT, Verb::SetCardContent, command)?;
    let id = args::row_id(&caps, 1)?;

    store.set_card_content(id, &codec::encode(args::text(&caps, 2)))?;
    Ok(Reply::Done)
}

/// Decoded content of a card
pub fn get_card_content(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&GET_CONTENT, Verb::GetCardContent, command)?;
    let card = store.card(args::row_id(&caps, 1)?)?;
    Ok(Reply::Text(codec::decode(&card.content)))
}

pub fn set_due_date(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&SET_DUE_DATE, Verb::SetDueDate, command)?;
    let id = args::row_id(&caps, 1)?;
    let due_date = args::number(&caps, 2)?;

    store.set_due_date(id, due_date)?;
    Ok(Reply::Done)
}

pub fn get_due_date(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&GET_DUE_DATE, Verb::GetDueDate, command)?;
    let card = store.card(args::row_id(&caps, 1)?)?;
    Ok(Reply::Text(card.due_date.to_string()))
}

/// Sets the due date to now plus an interval such as `3d` or `2w`
pub fn set_due_in(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&SET_DUE_IN, Verb::SetDueIn, command)?;
    let id = args::row_id(&caps, 1)?;
    let interval = args::text(&caps, 2)
        .parse::<DueInterval>()
        .map_err(|e| CommandError::Parse(e.to_string()))?;

    let due_date = interval.due_from(Utc::now());
    store.set_due_date(id, due_date)?;

    tracing::debug!(id, %interval, due_date, "set due date");
    Ok(Reply::Done)
}

/// Moves every overdue card of the source lists into the destination,
/// then reindexes the destination
pub fn move_due_cards(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&MOVE_DUE, Verb::MoveDueCards, command)?;
    let sources = args::id_list(args::text(&caps, 1))?;
    let dest = store.list(args::row_id(&caps, 2)?)?;

    let now = Utc::now().timestamp();
    let mut moved = 0;
    for source in sources {
        moved += store.move_overdue_cards(source, dest.id, now)?;
    }
    store.reindex(Scope::Cards(dest.id))?;

    tracing::debug!(dest = dest.id, moved, "moved due cards");
    Ok(Reply::Done)
}

pub fn show_cards(store: &Store, session: &Session, command: &str) -> CommandResult {
    let caps = args::capture(&SHOW_CARDS, Verb::ShowCards, command)?;
    let list = find_list(store, session, &args::named(&caps, 1)?)?;

    let mut table = Table::new(&["id", "due", "title", "content"]);
    for card in store.cards_in(list.id)? {
        table.push(vec![
            card.id.into(),
            card.due_date.into(),
            card.title.into(),
            card.content.into(),
        ]);
    }
    Ok(Reply::Table(table))
}

/// Moves a card to the end of another list.
///
/// The target is a list selector or a `next`/`prev` step. Steps walk the
/// lists of the card's own board, titles are looked up in the active
/// board, and `in <board>` overrides both. Steps stop at the first and
/// last list. A card moved to its own list goes to the end of it.
pub fn move_card(store: &Store, session: &Session, command: &str) -> CommandResult {
    let caps = args::capture(&MOVE_CARD, Verb::MoveCard, command)?;
    let card = store.card(args::row_id(&caps, 1)?)?;
    let target: Selector = args::text(&caps, 2).parse()?;
    let board = match args::group(&caps, 3) {
        Some(_) => Some(store.resolve_board(&args::named(&caps, 3)?)?),
        None => None,
    };

    let dest = match &target {
        Selector::Relative(step) => {
            let board_id = match &board {
                Some(board) => board.id,
                None => store.list(card.list_id)?.board_id,
            };
            step_list(store, card.list_id, board_id, *step)?
        }
        Selector::Id(id) => store.list(*id)?.id,
        Selector::Title(_) => {
            let board_id = match &board {
                Some(board) => board.id,
                None => store.active_board(session)?.id,
            };
            store.resolve_list(&target, board_id)?.id
        }
    };

    store.reparent(EntityKind::Card, card.id, dest)?;
    Ok(Reply::Done)
}

/// Neighbouring list of `list_id` within `board_id`
fn step_list(store: &Store, list_id: RowId, board_id: RowId, step: Step) -> Result<RowId, CommandError> {
    let ids = store.list_ids_in(board_id)?;
    let position = ids.iter().position(|id| *id == list_id).ok_or_else(|| {
        CommandError::Reference(format!("List {} is not in board {}", list_id, board_id))
    })?;

    let position = match step {
        Step::Next => (position + 1).min(ids.len() - 1),
        Step::Prev => position.saturating_sub(1),
    };
    Ok(ids[position])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Board "Work" (1) with lists "Todo" (1), "Doing" (2), "Done" (3);
    /// board "Home" (2) with list "Todo" (4)
    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let work = store.insert_board("Work", 0).unwrap();
        let home = store.insert_board("Home", 1).unwrap();
        store.insert_list("Todo", 0, work).unwrap();
        store.insert_list("Doing", 1, work).unwrap();
        store.insert_list("Done", 2, work).unwrap();
        store.insert_list("Todo", 0, home).unwrap();
        store
    }

    fn show(store: &Store, list: RowId) -> String {
        show_cards(store, &Session::new(), &format!("show-cards {}", list))
            .unwrap()
            .render()
    }

    #[test]
    fn add_and_show_single_card() {
        let store = store();
        let session = Session::new();

        add_card(&store, &session, "add-card \"Task A\":\"\":-1 to 1").unwrap();

        assert_eq!(show(&store, 1), "id\tdue\ttitle\tcontent\n1\t-1\tTask A\t\n");
    }

    #[test]
    fn add_card_by_title_uses_active_board() {
        let store = store();
        let mut session = Session::new();
        session.set_active_board(1);

        add_card(&store, &session, "add-card \"Chore\":\"\": to \"Todo\"").unwrap();

        let card = store.card(1).unwrap();
        assert_eq!(card.list_id, 4);
        assert_eq!(card.due_date, NO_DUE_DATE);
    }

    #[test]
    fn add_card_encodes_text() {
        let store = store();
        add_card(
            &store,
            &Session::new(),
            "add-card \"It's\":\"line one\nline\ttwo\":100 to 1",
        )
        .unwrap();

        let card = store.card(1).unwrap();
        assert_eq!(card.title, "It<|QUOTE|>s");
        assert_eq!(card.content, "line one<|NEWLINE|>line<|TAB|>two");
        assert_eq!(card.due_date, 100);
        assert_eq!(show(&store, 1).lines().count(), 2);
    }

    #[test]
    fn add_card_rejects_bad_due_date() {
        let store = store();
        assert!(matches!(
            add_card(&store, &Session::new(), "add-card \"A\":\"\":-7 to 1"),
            Err(CommandError::Integrity(_))
        ));
    }

    #[test]
    fn add_card_to_missing_list_is_reference_error() {
        let store = store();
        assert!(matches!(
            add_card(&store, &Session::new(), "add-card \"A\":\"\":-1 to \"Nope\""),
            Err(CommandError::Reference(_))
        ));
    }

    #[test]
    fn cards_show_in_idx_order_after_shift() {
        let store = store();
        let session = Session::new();
        add_card(&store, &session, "add-card \"A\":\"\":-1 to 1").unwrap();
        add_card(&store, &session, "add-card \"B\":\"\":-1 to 1").unwrap();

        assert_eq!(show(&store, 1), "id\tdue\ttitle\tcontent\n1\t-1\tA\t\n2\t-1\tB\t\n");

        store.shift(EntityKind::Card, 2, 0).unwrap();

        assert_eq!(show(&store, 1), "id\tdue\ttitle\tcontent\n2\t-1\tB\t\n1\t-1\tA\t\n");
    }

    #[test]
    fn content_round_trips_through_get() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();

        set_card_content(&store, "set-card-content 1 \"Bob's\tnotes\nmore\"").unwrap();

        assert_eq!(
            get_card_content(&store, "get-card-content 1").unwrap(),
            Reply::Text("Bob's\tnotes\nmore".into())
        );
    }

    #[test]
    fn due_date_set_and_get() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();

        set_due_date(&store, "set-due-date 1 1700000000").unwrap();
        assert_eq!(
            get_due_date(&store, "get-due-date 1").unwrap(),
            Reply::Text("1700000000".into())
        );

        set_due_date(&store, "set-due-date 1 -1").unwrap();
        assert_eq!(store.card(1).unwrap().due_date, NO_DUE_DATE);
    }

    #[test]
    fn set_due_in_is_relative_to_now() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();

        let before = Utc::now().timestamp();
        set_due_in(&store, "set-due-in 1 1d").unwrap();
        let after = Utc::now().timestamp();

        let due = store.card(1).unwrap().due_date;
        assert!(due >= before + 86_400 && due <= after + 86_400);
    }

    #[test]
    fn set_due_in_rejects_unknown_unit() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();
        assert!(matches!(
            set_due_in(&store, "set-due-in 1 3h"),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn overdue_cards_move_and_future_cards_stay() {
        let store = store();
        let now = Utc::now().timestamp();
        let overdue = store.insert_card("Late", 0, 1, "", now - 3_600).unwrap();
        let future = store.insert_card("Soon", 1, 1, "", now + 86_400).unwrap();
        let other = store.insert_card("Also late", 0, 2, "", 10).unwrap();
        let existing = store.insert_card("Already here", 7, 3, "", -1).unwrap();

        move_due_cards(&store, "move-due-cards 1,2 to 3").unwrap();

        assert_eq!(store.card(overdue).unwrap().list_id, 3);
        assert_eq!(store.card(other).unwrap().list_id, 3);
        assert_eq!(store.card(future).unwrap().list_id, 1);

        let mut idx: Vec<_> = store.cards_in(3).unwrap().iter().map(|c| c.idx).collect();
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(store.card(existing).unwrap().list_id, 3);
    }

    #[test]
    fn move_due_cards_to_missing_list_is_reference_error() {
        let store = store();
        assert!(matches!(
            move_due_cards(&store, "move-due-cards 1 to 99"),
            Err(CommandError::Reference(_))
        ));
    }

    #[test]
    fn move_card_by_id_appends() {
        let store = store();
        let card = store.insert_card("A", 0, 1, "", -1).unwrap();
        store.insert_card("X", 0, 3, "", -1).unwrap();

        move_card(&store, &Session::new(), "move-card 1 to 3").unwrap();

        let card = store.card(card).unwrap();
        assert_eq!(card.list_id, 3);
        assert_eq!(card.idx, 1);
    }

    #[test]
    fn move_card_steps_through_lists() {
        let store = store();
        let card = store.insert_card("A", 0, 1, "", -1).unwrap();
        let session = Session::new();

        move_card(&store, &session, "move-card 1 to next").unwrap();
        assert_eq!(store.card(card).unwrap().list_id, 2);

        move_card(&store, &session, "move-card 1 to next").unwrap();
        assert_eq!(store.card(card).unwrap().list_id, 3);

        move_card(&store, &session, "move-card 1 to prev").unwrap();
        assert_eq!(store.card(card).unwrap().list_id, 2);
    }

    #[test]
    fn move_card_stops_at_board_edges() {
        let store = store();
        let first = store.insert_card("First", 0, 1, "", -1).unwrap();
        let last = store.insert_card("Last", 0, 3, "", -1).unwrap();
        let session = Session::new();

        move_card(&store, &session, &format!("move-card {} to prev", first)).unwrap();
        move_card(&store, &session, &format!("move-card {} to next", last)).unwrap();

        assert_eq!(store.card(first).unwrap().list_id, 1);
        assert_eq!(store.card(last).unwrap().list_id, 3);
    }

    #[test]
    fn move_card_at_edge_goes_to_end_of_own_list() {
        let store = store();
        let a = store.insert_card("A", 0, 3, "", -1).unwrap();
        let b = store.insert_card("B", 1, 3, "", -1).unwrap();
        let session = Session::new();

        move_card(&store, &session, &format!("move-card {} to next", a)).unwrap();
        assert_eq!(store.sibling_ids(Scope::Cards(3)).unwrap(), vec![b, a]);

        move_card(&store, &session, &format!("move-card {} to 3", b)).unwrap();
        assert_eq!(store.sibling_ids(Scope::Cards(3)).unwrap(), vec![a, b]);
        assert_eq!(store.card(b).unwrap().list_id, 3);
    }

    #[test]
    fn move_card_steps_use_card_board_not_active_board() {
        let store = store();
        let card = store.insert_card("Chore", 0, 4, "", -1).unwrap();

        // Active board is "Work"; the card lives on "Home" which has one list
        move_card(&store, &Session::new(), "move-card 1 to next").unwrap();

        assert_eq!(store.card(card).unwrap().list_id, 4);
    }

    #[test]
    fn move_card_by_title_in_named_board() {
        let store = store();
        let card = store.insert_card("A", 0, 1, "", -1).unwrap();

        move_card(&store, &Session::new(), "move-card 1 to \"Todo\" in \"Home\"").unwrap();

        assert_eq!(store.card(card).unwrap().list_id, 4);
    }

    #[test]
    fn move_card_step_outside_named_board_is_reference_error() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();
        assert!(matches!(
            move_card(&store, &Session::new(), "move-card 1 to next in 2"),
            Err(CommandError::Reference(_))
        ));
    }

    #[test]
    fn move_card_bare_word_is_unsupported() {
        let store = store();
        store.insert_card("A", 0, 1, "", -1).unwrap();
        assert!(matches!(
            move_card(&store, &Session::new(), "move-card 1 to Done"),
            Err(CommandError::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn show_cards_relative_selector_is_unsupported() {
        let store = store();
        assert!(matches!(
            show_cards(&store, &Session::new(), "show-cards next"),
            Err(CommandError::UnsupportedSelector(_))
        ));
    }
}
