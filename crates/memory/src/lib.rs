//! Persistent player memory for the ffai gateway.
//!
//! Memory is **not chat history**. It is an open-ended bag of facts the
//! model has extracted about a player, merged cumulatively over time and
//! serialized into the answer prompt before each request.
//!
//! # Architecture
//!
//! The [`PlayerStore`] trait is fully synchronous. Backends serialize
//! their own access; the gateway shares one store across requests. The
//! read-modify-write cycle (load, merge, upsert) is not atomic:
//! concurrent requests for the same player are last-write-wins on the
//! whole record.

pub use store::InMemory;

mod store;

use anyhow::Result;
use compact_str::CompactString;
use serde_json::Value;

/// Open-ended facts about a player: field name to arbitrary JSON value.
pub type Facts = serde_json::Map<String, Value>;

/// A persisted player record.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    /// Caller-supplied player identifier.
    pub ff_id: CompactString,
    /// Everything remembered about the player so far.
    pub facts: Facts,
    /// Unix seconds of the last successful write.
    pub updated_at: u64,
}

/// Keyed storage for player records.
///
/// At most one record exists per identifier; `upsert` creates the record
/// if absent, else replaces its facts in place.
pub trait PlayerStore: Send + Sync {
    /// Load the record for a player. Absence is not an error.
    fn load(&self, ff_id: &str) -> Result<Option<PlayerRecord>>;

    /// Create or replace the record for a player, stamping `updated_at`
    /// with the current time.
    fn upsert(&self, ff_id: &str, facts: &Facts) -> Result<()>;
}

/// Shallow-merge `new` over `old`: new keys win, old-only keys survive.
///
/// Overlapping keys are overwritten whole; nested objects are not merged
/// recursively. Merging the empty mapping is the identity.
pub fn merge_facts(old: &Facts, new: &Facts) -> Facts {
    let mut merged = old.clone();
    for (key, value) in new {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Error from interpreting model output as a facts mapping.
#[derive(Debug)]
pub enum ParseFactsError {
    /// The text is not valid JSON.
    Syntax(serde_json::Error),
    /// The text is valid JSON but not an object.
    NotAnObject,
}

impl std::fmt::Display for ParseFactsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "invalid JSON: {e}"),
            Self::NotAnObject => write!(f, "expected a JSON object"),
        }
    }
}

impl std::error::Error for ParseFactsError {}

/// Parse model output as a facts mapping.
///
/// Tolerates a fenced code block around the JSON. The caller decides the
/// fallback on failure; nothing is swallowed here.
pub fn parse_facts(text: &str) -> Result<Facts, ParseFactsError> {
    let json = strip_code_fences(text);
    match serde_json::from_str::<Value>(json).map_err(ParseFactsError::Syntax)? {
        Value::Object(map) => Ok(map),
        _ => Err(ParseFactsError::NotAnObject),
    }
}

/// Strip a surrounding ``` fence (with optional `json` tag) if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

/// Current unix timestamp in seconds.
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs()
}
