//! Button commands
//!
//! A button stores a command template. `get-button` hands back the
//! template untouched; substituting `$CARD`/`$LIST` is up to the caller
//! (see [`crate::domain::ButtonTemplate`]).

use std::sync::LazyLock;

use regex::Regex;

use super::args;
use super::format::{Reply, Table};
use super::{CommandResult, Verb};
use crate::domain::codec;
use crate::storage::{Scope, Store};

static ADD_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r#"add-button "(.*?)" "(.*)""#));
static SHOW_BUTTONS: LazyLock<Regex> = LazyLock::new(|| args::pattern("show-buttons"));
static GET_BUTTON: LazyLock<Regex> = LazyLock::new(|| args::pattern(r"get-button (\d+)"));
static RENAME_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| args::pattern(r#"rename-button (\d+) "(.*?)" "(.*)""#));

pub fn add_button(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&ADD_BUTTON, Verb::AddButton, command)?;
    let name = codec::encode(args::text(&caps, 1));
    let template = codec::encode(args::text(&caps, 2));

    let idx = store.next_index(Scope::Buttons)?;
    let id = store.insert_button(&name, &template, idx)?;

    tracing::debug!(id, idx, "added button");
    Ok(Reply::Done)
}

pub fn show_buttons(store: &Store, command: &str) -> CommandResult {
    args::capture(&SHOW_BUTTONS, Verb::ShowButtons, command)?;

    let mut table = Table::new(&["id", "name", "command"]);
    for button in store.buttons()? {
        table.push(vec![button.id.into(), button.name.into(), button.command.into()]);
    }
    Ok(Reply::Table(table))
}

/// The button's command template, decoded
pub fn get_button(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&GET_BUTTON, Verb::GetButton, command)?;
    let button = store.button(args::row_id(&caps, 1)?)?;
    Ok(Reply::Text(codec::decode(&button.command)))
}

/// Replaces both the name and the template
pub fn rename_button(store: &Store, command: &str) -> CommandResult {
    let caps = args::capture(&RENAME_BUTTON, Verb::RenameButton, command)?;
    let id = args::row_id(&caps, 1)?;
    let name = codec::encode(args::text(&caps, 2));
    let template = codec::encode(args::text(&caps, 3));

    store.set_button(id, &name, &template)?;
    Ok(Reply::Done)
}
