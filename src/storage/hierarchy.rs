//! Structural deletes, orphan cleanup and board navigation
//!
//! Lists and cards point at their parent by id only, with no cascade in
//! the database. Deleting a board or list therefore runs a two-phase
//! sweep: lists whose board is gone, then cards whose list is gone. The
//! second phase picks up cards orphaned by the first.

use rusqlite::params;

use super::store::{Store, StoreError, StoreResult};
use crate::domain::{codec, Board, EntityKind, List, RowId, Selector, Session};

/// Rows removed by an orphan sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sweep {
    pub lists: usize,
    pub cards: usize,
}

impl Store {
    /// Deletes a row. Board and list deletes also sweep orphans.
    pub fn delete(&self, kind: EntityKind, id: RowId) -> StoreResult<Sweep> {
        self.delete_row(kind, id)?;

        match kind {
            EntityKind::Board | EntityKind::List => self.cull_orphans(),
            EntityKind::Card | EntityKind::Button => Ok(Sweep::default()),
        }
    }

    /// Removes lists without a board, then cards without a list
    pub fn cull_orphans(&self) -> StoreResult<Sweep> {
        let lists = self.conn().execute(
            "DELETE FROM lists WHERE board_id NOT IN (SELECT id FROM boards)",
            [],
        )?;
        let cards = self.conn().execute(
            "DELETE FROM cards WHERE list_id NOT IN (SELECT id FROM lists)",
            [],
        )?;

        tracing::debug!(lists, cards, "culled orphans");
        Ok(Sweep { lists, cards })
    }

    /// Board the session's pointer currently selects
    pub fn active_board(&self, session: &Session) -> StoreResult<Board> {
        self.board_at(session.active_board())
    }

    /// Points the session at the selected board. The pointer takes the
    /// board's stored idx.
    pub fn navigate(&self, session: &mut Session, selector: &Selector) -> StoreResult<Board> {
        let board = self.resolve_board(selector)?;
        session.set_active_board(usize::try_from(board.idx).unwrap_or(0));

        tracing::debug!(board = board.id, idx = board.idx, "navigate");
        Ok(board)
    }

    /// Resolves a board by quoted title or id
    pub fn resolve_board(&self, selector: &Selector) -> StoreResult<Board> {
        match selector {
            Selector::Id(id) => self.board(*id),
            Selector::Title(title) => self
                .board_by_title(&codec::encode(title))?
                .ok_or_else(|| StoreError::Reference(format!("No board titled \"{}\"", title))),
            Selector::Relative(_) => Err(StoreError::Unsupported(selector.to_string())),
        }
    }

    /// Resolves a list. Titles are looked up inside `board_id`; ids are
    /// resolved regardless of board.
    pub fn resolve_list(&self, selector: &Selector, board_id: RowId) -> StoreResult<List> {
        match selector {
            Selector::Id(id) => self.list(*id),
            Selector::Title(title) => self
                .list_by_title(board_id, &codec::encode(title))?
                .ok_or_else(|| {
                    StoreError::Reference(format!(
                        "No list titled \"{}\" in board {}",
                        title, board_id
                    ))
                }),
            Selector::Relative(_) => Err(StoreError::Unsupported(selector.to_string())),
        }
    }

    /// List ids of a board in display order
    pub fn list_ids_in(&self, board_id: RowId) -> StoreResult<Vec<RowId>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id FROM lists WHERE board_id = ?1 ORDER BY idx ASC, id ASC")?;
        let ids = stmt
            .query_map(params![board_id], |row| row.get(0))?
            .collect::<Result<Vec<RowId>, _>>()?;
        Ok(ids)
    }
}
