//! The ask pipeline: validate, load memory, answer, extract facts,
//! merge, persist, respond.

use crate::error::AskError;
use crate::prompt;
use compact_str::CompactString;
use llm::Generate;
use memory::{Facts, PlayerStore, merge_facts, parse_facts};
use serde::Serialize;

/// Successful response body for an ask request.
#[derive(Debug, Serialize)]
pub struct AskReply {
    /// The player identifier, echoed back.
    pub ff_id: CompactString,
    /// The generated reply text.
    pub reply: String,
    /// The facts extracted in this request (not the full merged set).
    pub saved_memory: Facts,
}

/// Run the full pipeline for one request.
///
/// The steps are strictly sequential: one store read, two generation
/// calls, one store write. The read-modify-write sequence is not
/// atomic; concurrent requests for the same player are last-write-wins.
pub async fn handle<G: Generate, S: PlayerStore>(
    provider: &G,
    store: &S,
    ff_id: &str,
    q: &str,
) -> Result<AskReply, AskError> {
    if ff_id.is_empty() || q.is_empty() {
        return Err(AskError::BadRequest("ff_id and q required"));
    }

    // Prior facts; a player without a record starts empty.
    let old_facts = store
        .load(ff_id)?
        .map(|record| record.facts)
        .unwrap_or_default();

    let reply = provider.generate(&prompt::answer(&old_facts, q)).await?;

    // The extraction step never fails the request: a failed call or
    // unparseable output degrades to the empty mapping.
    let extracted = match provider.generate(&prompt::extraction(&reply)).await {
        Ok(text) => match parse_facts(&text) {
            Ok(facts) => facts,
            Err(e) => {
                tracing::warn!("extracted facts did not parse: {e}");
                Facts::new()
            }
        },
        Err(e) => {
            tracing::warn!("fact extraction call failed: {e}");
            Facts::new()
        }
    };

    let merged = merge_facts(&old_facts, &extracted);
    store.upsert(ff_id, &merged)?;

    Ok(AskReply {
        ff_id: ff_id.into(),
        reply,
        saved_memory: extracted,
    })
}
