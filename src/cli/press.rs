//! Running a button against a selection

use anyhow::{bail, Result};

use super::output::Output;
use crate::command::{Liszt, Reply};
use crate::domain::{ButtonTemplate, RowId, LIST_PLACEHOLDER};

/// Fetches a button's template, expands it and runs every resulting
/// command. Stops at the first failure.
pub fn run(
    liszt: &mut Liszt,
    output: &Output,
    button: RowId,
    cards: &[RowId],
    list: Option<RowId>,
) -> Result<()> {
    let template = match liszt.execute(&format!("get-button {}", button))? {
        Reply::Text(command) => ButtonTemplate::new(command),
        other => bail!("Unexpected reply to get-button: {:?}", other),
    };

    if template.is_per_card() && cards.is_empty() {
        bail!("Button {} runs per card; pass at least one --card", button);
    }
    if list.is_none() && template.as_str().contains(LIST_PLACEHOLDER) {
        bail!("Button {} needs a list; pass --list", button);
    }

    for command in template.expand(cards, list) {
        output.verbose_ctx("press", &command);
        let reply = liszt.execute(&command)?;
        output.reply(&reply);
    }

    Ok(())
}
