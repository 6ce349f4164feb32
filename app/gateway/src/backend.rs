//! Memory backend enum for static dispatch over store implementations.
//!
//! Wraps [`InMemory`] and [`SqlitePlayers`] with [`PlayerStore`] trait
//! delegation; the variant is selected from gateway configuration.

use anyhow::Result;
use memory::{Facts, InMemory, PlayerRecord, PlayerStore};
use sqlite::SqlitePlayers;

/// Memory backend selected from gateway configuration.
///
/// Delegates all [`PlayerStore`] methods to the inner variant.
pub enum MemoryBackend {
    /// Volatile in-memory store.
    InMemory(InMemory),
    /// SQLite-backed persistent store.
    Sqlite(SqlitePlayers),
}

impl MemoryBackend {
    /// Create from config: in-memory variant.
    pub fn in_memory() -> Self {
        Self::InMemory(InMemory::new())
    }

    /// Create from config: sqlite variant at the given path.
    pub fn sqlite(path: &str) -> Result<Self> {
        Ok(Self::Sqlite(SqlitePlayers::open(path)?))
    }
}

impl PlayerStore for MemoryBackend {
    fn load(&self, ff_id: &str) -> Result<Option<PlayerRecord>> {
        match self {
            Self::InMemory(store) => store.load(ff_id),
            Self::Sqlite(store) => store.load(ff_id),
        }
    }

    fn upsert(&self, ff_id: &str, facts: &Facts) -> Result<()> {
        match self {
            Self::InMemory(store) => store.upsert(ff_id, facts),
            Self::Sqlite(store) => store.upsert(ff_id, facts),
        }
    }
}
