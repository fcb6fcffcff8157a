//! Per-caller session state

/// Holds the active-board pointer for one caller
///
/// The pointer is an ordinal into the idx-ordered board list, not a
/// board id. It only changes through `goto`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    active_board: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the active board in idx order
    pub fn active_board(&self) -> usize {
        self.active_board
    }

    pub fn set_active_board(&mut self, position: usize) {
        self.active_board = position;
    }
}
