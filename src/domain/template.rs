//! Button command templates
//!
//! A button stores a command string with optional `$CARD` and `$LIST`
//! placeholders. Pressing it against a selection expands the template
//! into the commands to run.

use super::records::RowId;

pub const CARD_PLACEHOLDER: &str = "$CARD";
pub const LIST_PLACEHOLDER: &str = "$LIST";

/// A command template as stored on a button (decoded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTemplate {
    command: String,
}

impl ButtonTemplate {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.command
    }

    /// Returns true if the template runs once per selected card
    pub fn is_per_card(&self) -> bool {
        self.command.contains(CARD_PLACEHOLDER)
    }

    /// Expands the template against a selection
    ///
    /// Per-card templates yield one command per card (none for an empty
    /// selection). Other templates yield exactly one command. `$LIST` is
    /// left untouched when no list is given.
    pub fn expand(&self, cards: &[RowId], list: Option<RowId>) -> Vec<String> {
        let with_list = match list {
            Some(list) => self.command.replace(LIST_PLACEHOLDER, &list.to_string()),
            None => self.command.clone(),
        };

        if self.is_per_card() {
            cards
                .iter()
                .map(|card| with_list.replace(CARD_PLACEHOLDER, &card.to_string()))
                .collect()
        } else {
            vec![with_list]
        }
    }
}
