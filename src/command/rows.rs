//! Verbs that work the same way for every entity kind

use std::sync::LazyLock;

use regex::Regex;

use super::args;
use super::format::Reply;
use super::{CommandResult, Verb};
use crate::domain::{codec, EntityKind};
use crate::storage::Store;

static DELETE: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r"delete-(?:card|list|board|button) (\d+)"));
static SHIFT: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r"shift-(?:card|list|board|button) (\d+) to (-?\d+)"));
static RENAME: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r#"rename-(?:card|list|board) (\d+) "(.*)""#));

/// `delete-<kind> <id>`. Board and list deletes sweep orphans.
pub fn delete(store: &Store, kind: EntityKind, verb: Verb, command: &str) -> CommandResult {
    let caps = args::capture(&DELETE, verb, command)?;
    let id = args::row_id(&caps, 1)?;

    let sweep = store.delete(kind, id)?;
    tracing::debug!(%kind, id, lists = sweep.lists, cards = sweep.cards, "deleted");
    Ok(Reply::Done)
}

/// `shift-<kind> <id> to <index>`
pub fn shift(store: &Store, kind: EntityKind, verb: Verb, command: &str) -> CommandResult {
    let caps = args::capture(&SHIFT, verb, command)?;
    let id = args::row_id(&caps, 1)?;
    let index = args::number(&caps, 2)?;

    store.shift(kind, id, index)?;
    Ok(Reply::Done)
}

/// `rename-<kind> <id> "<title>"` for boards, lists and cards
pub fn rename(store: &Store, kind: EntityKind, verb: Verb, command: &str) -> CommandResult {
    let caps = args::capture(&RENAME, verb, command)?;
    let id = args::row_id(&caps, 1)?;
    let title = codec::encode(args::text(&caps, 2));

    store.set_title(kind, id, &title)?;
    Ok(Reply::Done)
}
