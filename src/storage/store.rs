//! SQLite backing store
//!
//! Holds the single connection, creates and seeds the schema, and offers
//! row-level reads and writes. The connection always has a transaction
//! open; [`Store::commit`] ends it and starts the next one, so nothing is
//! durable until the caller commits.
//!
//! Text arguments are written as given. Callers encode free-form text
//! with [`crate::domain::codec`] first.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use thiserror::Error;

use crate::domain::{Board, Button, Card, EntityKind, List, RowId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Reference(String),

    #[error("Unsupported selector '{0}'")]
    Unsupported(String),

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::Integrity(message.clone().unwrap_or_else(|| code.to_string()))
            }
            _ => StoreError::Sqlite(err),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Table holding rows of the given kind
pub(crate) fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Board => "boards",
        EntityKind::List => "lists",
        EntityKind::Card => "cards",
        EntityKind::Button => "buttons",
    }
}

/// Column referencing the parent row, for kinds that have a parent
pub(crate) fn parent_column(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::List => Some("board_id"),
        EntityKind::Card => Some("list_id"),
        EntityKind::Board | EntityKind::Button => None,
    }
}

fn title_column(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Button => "name",
        _ => "title",
    }
}

pub(crate) fn missing(kind: EntityKind, id: RowId) -> StoreError {
    StoreError::Reference(format!("No {} with id {}", kind, id))
}

fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        title: row.get(1)?,
        idx: row.get(2)?,
    })
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<List> {
    Ok(List {
        id: row.get(0)?,
        title: row.get(1)?,
        idx: row.get(2)?,
        board_id: row.get(3)?,
    })
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        title: row.get(1)?,
        idx: row.get(2)?,
        list_id: row.get(3)?,
        content: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        due_date: row.get(5)?,
    })
}

fn button_from_row(row: &Row<'_>) -> rusqlite::Result<Button> {
    Ok(Button {
        id: row.get(0)?,
        name: row.get(1)?,
        command: row.get(2)?,
        idx: row.get(3)?,
    })
}

/// The backing store
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
    fresh: bool,
}

impl Store {
    /// Schema version - bump when the schema changes
    const SCHEMA_VERSION: i32 = 1;

    /// Opens (or creates) the database at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Opens an empty in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> StoreResult<Self> {
        let mut store = Self {
            conn,
            path,
            fresh: false,
        };

        store.conn.execute_batch("BEGIN")?;
        store.fresh = store.ensure_schema()?;
        store.commit()?;

        Ok(store)
    }

    /// Creates the schema if missing. Returns true if it was created.
    fn ensure_schema(&self) -> StoreResult<bool> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == Self::SCHEMA_VERSION {
            return Ok(false);
        }

        tracing::info!(version = Self::SCHEMA_VERSION, "creating schema");

        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS boards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                idx INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                idx INTEGER NOT NULL,
                board_id INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                idx INTEGER NOT NULL,
                list_id INTEGER NOT NULL,
                content TEXT,
                due_date INTEGER NOT NULL DEFAULT -1 CHECK (due_date >= -1)
            );

            CREATE TABLE IF NOT EXISTS buttons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                command TEXT NOT NULL,
                idx INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_lists_board ON lists(board_id);
            CREATE INDEX IF NOT EXISTS idx_cards_list ON cards(list_id);
            ",
        )?;

        self.conn.execute_batch(&format!(
            "PRAGMA user_version = {}",
            Self::SCHEMA_VERSION
        ))?;

        Ok(true)
    }

    /// Returns true if this open created the schema
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Returns the database path (None for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Inserts the starter board, lists and button
    pub fn seed_defaults(&mut self) -> StoreResult<()> {
        tracing::info!("seeding default board");

        let board = self.insert_board("Personal", 0)?;
        for (idx, title) in ["To do", "Doing", "Done"].iter().enumerate() {
            self.insert_list(title, idx as i64, board)?;
        }
        self.insert_button("Delete card", "delete-card $CARD", 0)?;

        self.commit()
    }

    /// Makes all writes since the last commit durable
    pub fn commit(&mut self) -> StoreResult<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        self.conn.execute_batch("COMMIT; BEGIN")?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ---------------------------------------------------------------------
    // Inserts
    // ---------------------------------------------------------------------

    pub fn insert_board(&self, title: &str, idx: i64) -> StoreResult<RowId> {
        self.conn.execute(
            "INSERT INTO boards (title, idx) VALUES (?1, ?2)",
            params![title, idx],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_list(&self, title: &str, idx: i64, board_id: RowId) -> StoreResult<RowId> {
        self.conn.execute(
            "INSERT INTO lists (title, idx, board_id) VALUES (?1, ?2, ?3)",
            params![title, idx, board_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_card(
        &self,
        title: &str,
        idx: i64,
        list_id: RowId,
        content: &str,
        due_date: i64,
    ) -> StoreResult<RowId> {
        self.conn.execute(
            "INSERT INTO cards (title, idx, list_id, content, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![title, idx, list_id, content, due_date],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_button(&self, name: &str, command: &str, idx: i64) -> StoreResult<RowId> {
        self.conn.execute(
            "INSERT INTO buttons (name, command, idx) VALUES (?1, ?2, ?3)",
            params![name, command, idx],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ---------------------------------------------------------------------
    // Single-row reads
    // ---------------------------------------------------------------------

    pub fn board(&self, id: RowId) -> StoreResult<Board> {
        self.conn
            .query_row(
                "SELECT id, title, idx FROM boards WHERE id = ?1",
                params![id],
                board_from_row,
            )
            .optional()?
            .ok_or_else(|| missing(EntityKind::Board, id))
    }

    pub fn list(&self, id: RowId) -> StoreResult<List> {
        self.conn
            .query_row(
                "SELECT id, title, idx, board_id FROM lists WHERE id = ?1",
                params![id],
                list_from_row,
            )
            .optional()?
            .ok_or_else(|| missing(EntityKind::List, id))
    }

    pub fn card(&self, id: RowId) -> StoreResult<Card> {
        self.conn
            .query_row(
                "SELECT id, title, idx, list_id, content, due_date FROM cards WHERE id = ?1",
                params![id],
                card_from_row,
            )
            .optional()?
            .ok_or_else(|| missing(EntityKind::Card, id))
    }

    pub fn button(&self, id: RowId) -> StoreResult<Button> {
        self.conn
            .query_row(
                "SELECT id, name, command, idx FROM buttons WHERE id = ?1",
                params![id],
                button_from_row,
            )
            .optional()?
            .ok_or_else(|| missing(EntityKind::Button, id))
    }

    /// Board at `position` in idx order
    pub fn board_at(&self, position: usize) -> StoreResult<Board> {
        self.conn
            .query_row(
                "SELECT id, title, idx FROM boards ORDER BY idx ASC, id ASC LIMIT 1 OFFSET ?1",
                params![position as i64],
                board_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::Reference(format!("No board at position {}", position)))
    }

    /// First board with the given stored title
    pub fn board_by_title(&self, title: &str) -> StoreResult<Option<Board>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, title, idx FROM boards WHERE title = ?1 ORDER BY idx ASC, id ASC",
                params![title],
                board_from_row,
            )
            .optional()?)
    }

    /// First list in `board_id` with the given stored title
    pub fn list_by_title(&self, board_id: RowId, title: &str) -> StoreResult<Option<List>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, title, idx, board_id FROM lists
                 WHERE title = ?1 AND board_id = ?2
                 ORDER BY idx ASC, id ASC",
                params![title, board_id],
                list_from_row,
            )
            .optional()?)
    }

    // ---------------------------------------------------------------------
    // Ordered collections
    // ---------------------------------------------------------------------

    pub fn boards(&self) -> StoreResult<Vec<Board>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, idx FROM boards ORDER BY idx ASC, id ASC")?;
        let boards = stmt
            .query_map([], board_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(boards)
    }

    pub fn lists_in(&self, board_id: RowId) -> StoreResult<Vec<List>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, idx, board_id FROM lists
             WHERE board_id = ?1 ORDER BY idx ASC, id ASC",
        )?;
        let lists = stmt
            .query_map(params![board_id], list_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    pub fn cards_in(&self, list_id: RowId) -> StoreResult<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, idx, list_id, content, due_date FROM cards
             WHERE list_id = ?1 ORDER BY idx ASC, id ASC",
        )?;
        let cards = stmt
            .query_map(params![list_id], card_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    pub fn buttons(&self) -> StoreResult<Vec<Button>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, command, idx FROM buttons ORDER BY idx ASC, id ASC")?;
        let buttons = stmt
            .query_map([], button_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(buttons)
    }

    pub fn card_count(&self, list_id: RowId) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE list_id = ?1",
            params![list_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    // ---------------------------------------------------------------------
    // Updates
    // ---------------------------------------------------------------------

    /// Sets the title (or button name) of a row
    pub fn set_title(&self, kind: EntityKind, id: RowId, title: &str) -> StoreResult<()> {
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE id = ?2",
            table(kind),
            title_column(kind)
        );
        self.expect_one(kind, id, self.conn.execute(&sql, params![title, id])?)
    }

    pub fn set_button(&self, id: RowId, name: &str, command: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE buttons SET name = ?1, command = ?2 WHERE id = ?3",
            params![name, command, id],
        )?;
        self.expect_one(EntityKind::Button, id, changed)
    }

    pub fn set_card_content(&self, id: RowId, content: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET content = ?1 WHERE id = ?2",
            params![content, id],
        )?;
        self.expect_one(EntityKind::Card, id, changed)
    }

    pub fn set_due_date(&self, id: RowId, due_date: i64) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET due_date = ?1 WHERE id = ?2",
            params![due_date, id],
        )?;
        self.expect_one(EntityKind::Card, id, changed)
    }

    /// Moves every card of `source` that is past due at `now` into `dest`.
    /// Returns the number of cards moved.
    pub fn move_overdue_cards(&self, source: RowId, dest: RowId, now: i64) -> StoreResult<usize> {
        Ok(self.conn.execute(
            "UPDATE cards SET list_id = ?1
             WHERE list_id = ?2 AND due_date > 0 AND due_date < ?3",
            params![dest, source, now],
        )?)
    }

    /// Removes a single row
    pub fn delete_row(&self, kind: EntityKind, id: RowId) -> StoreResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table(kind));
        self.expect_one(kind, id, self.conn.execute(&sql, params![id])?)
    }

    fn expect_one(&self, kind: EntityKind, id: RowId, changed: usize) -> StoreResult<()> {
        if changed == 0 {
            Err(missing(kind, id))
        } else {
            Ok(())
        }
    }
}
