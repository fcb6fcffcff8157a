//! The command verb table

use std::fmt;

/// Every verb the router understands, in matching order.
///
/// A command is routed to the first verb its text starts with, so a verb
/// that is a prefix of another must come after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Where,
    Goto,

    AddCard,
    AddList,
    AddBoard,
    AddButton,

    SetCardContent,
    GetCardContent,

    SetDueDate,
    GetDueDate,
    SetDueIn,
    MoveDueCards,

    ShowCards,
    ShowLists,
    ShowBoards,
    ShowButtons,

    GetButton,

    RenameButton,
    RenameBoard,
    RenameList,
    RenameCard,

    MoveCard,
    MoveList,

    ShiftCard,
    ShiftList,
    ShiftBoard,
    ShiftButton,

    DeleteCard,
    DeleteList,
    DeleteBoard,
    DeleteButton,
}

impl Verb {
    pub const ALL: [Verb; 31] = [
        Verb::Where,
        Verb::Goto,
        Verb::AddCard,
        Verb::AddList,
        Verb::AddBoard,
        Verb::AddButton,
        Verb::SetCardContent,
        Verb::GetCardContent,
        Verb::SetDueDate,
        Verb::GetDueDate,
        Verb::SetDueIn,
        Verb::MoveDueCards,
        Verb::ShowCards,
        Verb::ShowLists,
        Verb::ShowBoards,
        Verb::ShowButtons,
        Verb::GetButton,
        Verb::RenameButton,
        Verb::RenameBoard,
        Verb::RenameList,
        Verb::RenameCard,
        Verb::MoveCard,
        Verb::MoveList,
        Verb::ShiftCard,
        Verb::ShiftList,
        Verb::ShiftBoard,
        Verb::ShiftButton,
        Verb::DeleteCard,
        Verb::DeleteList,
        Verb::DeleteBoard,
        Verb::DeleteButton,
    ];

    /// The word a command starts with
    pub fn keyword(&self) -> &'static str {
        match self {
            Verb::Where => "where",
            Verb::Goto => "goto",
            Verb::AddCard => "add-card",
            Verb::AddList => "add-list",
            Verb::AddBoard => "add-board",
            Verb::AddButton => "add-button",
            Verb::SetCardContent => "set-card-content",
            Verb::GetCardContent => "get-card-content",
            Verb::SetDueDate => "set-due-date",
            Verb::GetDueDate => "get-due-date",
            Verb::SetDueIn => "set-due-in",
            Verb::MoveDueCards => "move-due-cards",
            Verb::ShowCards => "show-cards",
            Verb::ShowLists => "show-lists",
            Verb::ShowBoards => "show-boards",
            Verb::ShowButtons => "show-buttons",
            Verb::GetButton => "get-button",
            Verb::RenameButton => "rename-button",
            Verb::RenameBoard => "rename-board",
            Verb::RenameList => "rename-list",
            Verb::RenameCard => "rename-card",
            Verb::MoveCard => "move-card",
            Verb::MoveList => "move-list",
            Verb::ShiftCard => "shift-card",
            Verb::ShiftList => "shift-list",
            Verb::ShiftBoard => "shift-board",
            Verb::ShiftButton => "shift-button",
            Verb::DeleteCard => "delete-card",
            Verb::DeleteList => "delete-list",
            Verb::DeleteBoard => "delete-board",
            Verb::DeleteButton => "delete-button",
        }
    }

    /// Argument synopsis, shown when a command fails to parse
    pub fn usage(&self) -> &'static str {
        match self {
            Verb::Where => "where",
            Verb::Goto => "goto <board>",
            Verb::AddCard => "add-card \"<title>\":\"<content>\":<due> to <list>",
            Verb::AddList => "add-list \"<title>\" to <board-id>",
            Verb::AddBoard => "add-board \"<title>\"",
            Verb::AddButton => "add-button \"<name>\" \"<command>\"",
            Verb::SetCardContent => "set-card-content <card-id> \"<content>\"",
            Verb::GetCardContent => "get-card-content <card-id>",
            Verb::SetDueDate => "set-due-date <card-id> <epoch-seconds|-1>",
            Verb::GetDueDate => "get-due-date <card-id>",
            Verb::SetDueIn => "set-due-in <card-id> <N><d|w|m|y>",
            Verb::MoveDueCards => "move-due-cards <list-id,...> to <list-id>",
            Verb::ShowCards => "show-cards <list>",
            Verb::ShowLists => "show-lists [<board>]",
            Verb::ShowBoards => "show-boards",
            Verb::ShowButtons => "show-buttons",
            Verb::GetButton => "get-button <button-id>",
            Verb::RenameButton => "rename-button <button-id> \"<name>\" \"<command>\"",
            Verb::RenameBoard => "rename-board <board-id> \"<title>\"",
            Verb::RenameList => "rename-list <list-id> \"<title>\"",
            Verb::RenameCard => "rename-card <card-id> \"<title>\"",
            Verb::MoveCard => "move-card <card-id> to <list|next|prev> [in <board>]",
            Verb::MoveList => "move-list <list> to <board>",
            Verb::ShiftCard => "shift-card <card-id> to <index>",
            Verb::ShiftList => "shift-list <list-id> to <index>",
            Verb::ShiftBoard => "shift-board <board-id> to <index>",
            Verb::ShiftButton => "shift-button <button-id> to <index>",
            Verb::DeleteCard => "delete-card <card-id>",
            Verb::DeleteList => "delete-list <list-id>",
            Verb::DeleteBoard => "delete-board <board-id>",
            Verb::DeleteButton => "delete-button <button-id>",
        }
    }

    /// Finds the verb a command starts with
    pub fn match_command(command: &str) -> Option<Verb> {
        Verb::ALL
            .into_iter()
            .find(|verb| command.starts_with(verb.keyword()))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
