//! In-memory player store.

use crate::{Facts, PlayerRecord, PlayerStore, now_unix};
use anyhow::Result;
use compact_str::CompactString;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Volatile store backed by `Mutex<BTreeMap>`.
///
/// Useful for tests and for running the gateway without persistence.
#[derive(Debug, Default)]
pub struct InMemory {
    records: Mutex<BTreeMap<CompactString, PlayerRecord>>,
}

impl InMemory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for InMemory {
    fn load(&self, ff_id: &str) -> Result<Option<PlayerRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.get(ff_id).cloned())
    }

    fn upsert(&self, ff_id: &str, facts: &Facts) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        records.insert(
            ff_id.into(),
            PlayerRecord {
                ff_id: ff_id.into(),
                facts: facts.clone(),
                updated_at: now_unix(),
            },
        );
        Ok(())
    }
}
