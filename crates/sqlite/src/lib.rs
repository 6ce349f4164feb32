//! SQLite-backed player store for the ffai gateway.
//!
//! Provides [`SqlitePlayers`], a persistent [`PlayerStore`](memory::PlayerStore)
//! implementation. All SQL lives in `sql/*.sql` files, loaded via
//! `include_str!`.

use anyhow::Result;
use compact_str::CompactString;
use memory::{Facts, PlayerRecord, PlayerStore, now_unix};
use rusqlite::{Connection, OptionalExtension};
use std::{path::Path, sync::Mutex};

const SQL_SCHEMA: &str = include_str!("../sql/schema.sql");
const SQL_SELECT_PLAYER: &str = include_str!("../sql/select_player.sql");
const SQL_UPSERT_PLAYER: &str = include_str!("../sql/upsert_player.sql");

/// SQLite-backed player store.
///
/// Wraps a `rusqlite::Connection` in a `Mutex` for thread safety. Facts
/// are stored as a JSON string in the `facts` column.
pub struct SqlitePlayers {
    conn: Mutex<Connection>,
}

impl SqlitePlayers {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SQL_SCHEMA)?;
        Ok(())
    }
}

impl PlayerStore for SqlitePlayers {
    fn load(&self, ff_id: &str) -> Result<Option<PlayerRecord>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(SQL_SELECT_PLAYER, [ff_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .optional()?;

        let Some((id, facts_json, updated_at)) = row else {
            return Ok(None);
        };
        let facts: Facts = serde_json::from_str(&facts_json)?;
        Ok(Some(PlayerRecord {
            ff_id: CompactString::new(id),
            facts,
            updated_at: updated_at as u64,
        }))
    }

    fn upsert(&self, ff_id: &str, facts: &Facts) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let facts_json = serde_json::to_string(facts)?;
        let now = now_unix() as i64;
        conn.execute(SQL_UPSERT_PLAYER, rusqlite::params![ff_id, facts_json, now])?;
        Ok(())
    }
}
