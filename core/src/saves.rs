//! SQLite save-slot persistence.
//!
//! RULE: only this file talks to the database. The snapshot is stored as
//! an opaque JSON blob and returned verbatim on load; the schema carries
//! no version column (cross-version portability is a non-goal).

use crate::{
    error::SimResult,
    state::{GameState, SavedGame},
    types::TimestampMs,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SaveStore {
    conn: Connection,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS saved_games (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL,
    date  INTEGER NOT NULL,
    state TEXT NOT NULL
);
";

impl SaveStore {
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Append one save slot. Duplicate names are permitted; ids are the
    /// only key.
    pub fn append(&self, save: &SavedGame) -> SimResult<()> {
        let blob = serde_json::to_string(&save.state)?;
        self.conn.execute(
            "INSERT INTO saved_games (id, name, date, state) VALUES (?1, ?2, ?3, ?4)",
            params![save.id, save.name, save.date, blob],
        )?;
        Ok(())
    }

    /// All slots, oldest first: (id, name, date).
    pub fn list(&self) -> SimResult<Vec<(String, String, TimestampMs)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, date FROM saved_games ORDER BY date ASC, id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Load the snapshot embedded in one slot, verbatim.
    pub fn load(&self, id: &str) -> SimResult<Option<GameState>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT state FROM saved_games WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match blob {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    /// Remove one slot; unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> SimResult<()> {
        self.conn
            .execute("DELETE FROM saved_games WHERE id = ?1", params![id])?;
        Ok(())
    }
}
