//! Sibling ordering
//!
//! Every row carries an `idx` that orders it among the rows sharing its
//! parent. The indices are meant to be `0..n` per parent but are only
//! restored on demand: [`Store::reindex`] compacts a scope, and
//! [`Store::shift`] reindexes before moving a row so the arithmetic holds
//! even over gapped or duplicated indices.

use rusqlite::{params, OptionalExtension};

use super::store::{missing, parent_column, table, Store, StoreResult};
use crate::domain::{EntityKind, RowId};

/// A set of siblings: all rows of one kind under one parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Boards,
    Buttons,
    /// Lists of a board
    Lists(RowId),
    /// Cards of a list
    Cards(RowId),
}

impl Scope {
    pub fn kind(&self) -> EntityKind {
        match self {
            Scope::Boards => EntityKind::Board,
            Scope::Buttons => EntityKind::Button,
            Scope::Lists(_) => EntityKind::List,
            Scope::Cards(_) => EntityKind::Card,
        }
    }

    /// Scope of `kind` rows under `parent` (ignored for top-level kinds)
    pub fn of(kind: EntityKind, parent: RowId) -> Self {
        match kind {
            EntityKind::Board => Scope::Boards,
            EntityKind::Button => Scope::Buttons,
            EntityKind::List => Scope::Lists(parent),
            EntityKind::Card => Scope::Cards(parent),
        }
    }

    fn parent(&self) -> Option<RowId> {
        match self {
            Scope::Boards | Scope::Buttons => None,
            Scope::Lists(parent) | Scope::Cards(parent) => Some(*parent),
        }
    }

    /// `WHERE` clause restricting a statement to this scope, with the
    /// parent id bound to `?1`
    fn filter(&self) -> String {
        match parent_column(self.kind()) {
            Some(column) => format!(" WHERE {} = ?1", column),
            None => String::new(),
        }
    }
}

impl Store {
    /// Index one past the largest sibling index, or 0 for an empty scope
    pub fn next_index(&self, scope: Scope) -> StoreResult<i64> {
        let sql = format!(
            "SELECT MAX(idx) FROM {}{}",
            table(scope.kind()),
            scope.filter()
        );
        let max: Option<i64> = match scope.parent() {
            Some(parent) => self.conn().query_row(&sql, params![parent], |row| row.get(0))?,
            None => self.conn().query_row(&sql, [], |row| row.get(0))?,
        };
        Ok(max.map_or(0, |m| m + 1))
    }

    /// Row ids of a scope in display order
    pub fn sibling_ids(&self, scope: Scope) -> StoreResult<Vec<RowId>> {
        let sql = format!(
            "SELECT id FROM {}{} ORDER BY idx ASC, id ASC",
            table(scope.kind()),
            scope.filter()
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let ids = match scope.parent() {
            Some(parent) => stmt
                .query_map(params![parent], |row| row.get(0))?
                .collect::<Result<Vec<RowId>, _>>()?,
            None => stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<RowId>, _>>()?,
        };
        Ok(ids)
    }

    /// Rewrites the scope's indices to `0..n`, keeping relative order.
    /// Ties on `idx` are broken by id.
    pub fn reindex(&self, scope: Scope) -> StoreResult<()> {
        let ids = self.sibling_ids(scope)?;
        tracing::debug!(?scope, count = ids.len(), "reindex");

        let sql = format!("UPDATE {} SET idx = ?1 WHERE id = ?2", table(scope.kind()));
        let mut stmt = self.conn().prepare(&sql)?;
        for (idx, id) in ids.iter().enumerate() {
            stmt.execute(params![idx as i64, id])?;
        }
        Ok(())
    }

    /// Current sibling scope of a row
    pub fn scope_of(&self, kind: EntityKind, id: RowId) -> StoreResult<Scope> {
        match parent_column(kind) {
            Some(column) => {
                let sql = format!("SELECT {} FROM {} WHERE id = ?1", column, table(kind));
                let parent: Option<RowId> = self
                    .conn()
                    .query_row(&sql, params![id], |row| row.get(0))
                    .optional()?;
                parent
                    .map(|parent| Scope::of(kind, parent))
                    .ok_or_else(|| missing(kind, id))
            }
            None => {
                self.index_of(kind, id)?;
                Ok(Scope::of(kind, 0))
            }
        }
    }

    fn index_of(&self, kind: EntityKind, id: RowId) -> StoreResult<i64> {
        let sql = format!("SELECT idx FROM {} WHERE id = ?1", table(kind));
        self.conn()
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| missing(kind, id))
    }

    /// Moves a row to `new_index` among its siblings, shifting the rows
    /// in between by one. `new_index` is clamped to `0..n`. Returns the
    /// index the row ends up at.
    pub fn shift(&self, kind: EntityKind, id: RowId, new_index: i64) -> StoreResult<i64> {
        let scope = self.scope_of(kind, id)?;
        self.reindex(scope)?;

        let count = self.sibling_ids(scope)?.len() as i64;
        let new_index = new_index.clamp(0, (count - 1).max(0));
        let old_index = self.index_of(kind, id)?;

        tracing::debug!(?scope, id, old_index, new_index, "shift");

        if new_index == old_index {
            return Ok(new_index);
        }

        let (delta, low, high) = if new_index > old_index {
            // (old, new] moves down by one
            (-1, old_index + 1, new_index)
        } else {
            // [new, old) moves up by one
            (1, new_index, old_index - 1)
        };

        let range = format!(
            "UPDATE {} SET idx = idx + ?1 WHERE idx >= ?2 AND idx <= ?3",
            table(kind)
        );
        match (scope.parent(), parent_column(kind)) {
            (Some(parent), Some(column)) => {
                let sql = format!("{} AND {} = ?4", range, column);
                self.conn().execute(&sql, params![delta, low, high, parent])?
            }
            _ => self.conn().execute(&range, params![delta, low, high])?,
        };

        let sql = format!("UPDATE {} SET idx = ?1 WHERE id = ?2", table(kind));
        self.conn().execute(&sql, params![new_index, id])?;

        Ok(new_index)
    }

    /// Moves a row under a new parent, appended after its new siblings.
    /// The vacated scope is left as is; its gap closes on the next
    /// reindex.
    pub fn reparent(&self, kind: EntityKind, id: RowId, new_parent: RowId) -> StoreResult<i64> {
        let Some(column) = parent_column(kind) else {
            return self.index_of(kind, id);
        };

        let dest = Scope::of(kind, new_parent);
        self.reindex(dest)?;
        let idx = self.next_index(dest)?;

        tracing::debug!(%kind, id, new_parent, idx, "reparent");

        let sql = format!(
            "UPDATE {} SET {} = ?1, idx = ?2 WHERE id = ?3",
            table(kind),
            column
        );
        let changed = self.conn().execute(&sql, params![new_parent, idx, id])?;
        if changed == 0 {
            return Err(missing(kind, id));
        }
        Ok(idx)
    }
}
