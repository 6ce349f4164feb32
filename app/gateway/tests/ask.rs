//! Ask pipeline tests: validation, memory merge, extraction fallback,
//! and failure mapping.

use anyhow::Result;
use ffai_gateway::{AskError, MemoryBackend, ask};
use llm::{Generate, NoopProvider};
use memory::{Facts, PlayerRecord, PlayerStore};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted provider: returns canned completions in order and records
/// every prompt it sees. Errors when the script runs out.
#[derive(Clone)]
struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    fn new(replies: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(String::from).collect())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Generate for ScriptedProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted reply left"))
    }
}

/// Provider that fails on every call.
#[derive(Clone, Copy)]
struct FailingProvider;

impl Generate for FailingProvider {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("upstream unavailable")
    }
}

/// Store that counts operations; upserts can be made to fail.
#[derive(Default)]
struct CountingStore {
    loads: AtomicUsize,
    upserts: AtomicUsize,
    fail_upsert: bool,
}

impl PlayerStore for CountingStore {
    fn load(&self, _ff_id: &str) -> Result<Option<PlayerRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    fn upsert(&self, _ff_id: &str, _facts: &Facts) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_upsert {
            anyhow::bail!("disk full")
        }
        Ok(())
    }
}

fn facts(value: serde_json::Value) -> Facts {
    value.as_object().unwrap().clone()
}

fn stored_facts(store: &MemoryBackend, ff_id: &str) -> Facts {
    store.load(ff_id).unwrap().unwrap().facts
}

#[tokio::test]
async fn missing_ff_id_is_rejected_before_any_call() {
    // NoopProvider panics on use: a generation call would abort the test.
    let store = CountingStore::default();
    let err = ask::handle(&NoopProvider, &store, "", "who am i")
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::BadRequest(_)));
    assert_eq!(err.to_string(), "ff_id and q required");
    assert_eq!(store.loads.load(Ordering::SeqCst), 0);
    assert_eq!(store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_question_is_rejected_before_any_call() {
    let store = CountingStore::default();
    let err = ask::handle(&NoopProvider, &store, "123", "")
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::BadRequest(_)));
    assert_eq!(store.loads.load(Ordering::SeqCst), 0);
    assert_eq!(store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn first_request_creates_record() {
    let provider = ScriptedProvider::new(["vanakkam Rio bro!", r#"{"name": "Rio"}"#]);
    let store = MemoryBackend::in_memory();

    let reply = ask::handle(&provider, &store, "123", "en peyar Rio")
        .await
        .unwrap();

    assert_eq!(reply.ff_id, "123");
    assert_eq!(reply.reply, "vanakkam Rio bro!");
    assert_eq!(
        serde_json::Value::Object(reply.saved_memory),
        json!({"name": "Rio"})
    );
    assert_eq!(
        serde_json::Value::Object(stored_facts(&store, "123")),
        json!({"name": "Rio"})
    );
}

#[tokio::test]
async fn merge_preserves_old_and_overwrites_overlapping() {
    let store = MemoryBackend::in_memory();
    store.upsert("p1", &facts(json!({"a": 1, "b": 2}))).unwrap();

    let provider = ScriptedProvider::new(["reply", r#"{"b": 3, "c": 4}"#]);
    let reply = ask::handle(&provider, &store, "p1", "update me")
        .await
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(reply.saved_memory),
        json!({"b": 3, "c": 4})
    );
    assert_eq!(
        serde_json::Value::Object(stored_facts(&store, "p1")),
        json!({"a": 1, "b": 3, "c": 4})
    );
}

#[tokio::test]
async fn unparseable_extraction_is_tolerated() {
    let store = MemoryBackend::in_memory();
    store.upsert("123", &facts(json!({"name": "Rio"}))).unwrap();

    let provider = ScriptedProvider::new(["some reply", "sorry bro, no json here"]);
    let reply = ask::handle(&provider, &store, "123", "anything")
        .await
        .unwrap();

    assert_eq!(reply.reply, "some reply");
    assert!(reply.saved_memory.is_empty());
    assert_eq!(
        serde_json::Value::Object(stored_facts(&store, "123")),
        json!({"name": "Rio"})
    );
}

#[tokio::test]
async fn failed_extraction_call_is_tolerated() {
    // One scripted reply only: the second call errors out.
    let store = MemoryBackend::in_memory();
    store.upsert("123", &facts(json!({"name": "Rio"}))).unwrap();

    let provider = ScriptedProvider::new(["some reply"]);
    let reply = ask::handle(&provider, &store, "123", "anything")
        .await
        .unwrap();

    assert!(reply.saved_memory.is_empty());
    assert_eq!(
        serde_json::Value::Object(stored_facts(&store, "123")),
        json!({"name": "Rio"})
    );
}

#[tokio::test]
async fn answer_failure_propagates_without_write() {
    let store = CountingStore::default();
    let err = ask::handle(&FailingProvider, &store, "123", "hi")
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::Internal(_)));
    assert_eq!(err.to_string(), "upstream unavailable");
    assert_eq!(store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_write_failure_is_internal() {
    // The reply was already generated; the failed persist still maps to
    // an internal failure and nothing is returned.
    let store = CountingStore {
        fail_upsert: true,
        ..Default::default()
    };
    let provider = ScriptedProvider::new(["reply", "{}"]);
    let err = ask::handle(&provider, &store, "123", "hi")
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::Internal(_)));
    assert_eq!(err.to_string(), "disk full");
}

#[tokio::test]
async fn prompts_carry_facts_reply_and_question() {
    let store = MemoryBackend::in_memory();
    store.upsert("123", &facts(json!({"name": "Rio"}))).unwrap();

    let provider = ScriptedProvider::new(["naan dhaan Rio", "{}"]);
    ask::handle(&provider, &store, "123", "who am i")
        .await
        .unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains(r#"{"name":"Rio"}"#));
    assert!(prompts[0].contains("who am i"));
    assert!(prompts[1].contains("naan dhaan Rio"));
}

#[tokio::test]
async fn end_to_end_example() {
    // Prior record {name: "Rio"}, question "who am i", reply R,
    // extraction {}: stored facts unchanged, saved_memory empty.
    let store = MemoryBackend::in_memory();
    store.upsert("123", &facts(json!({"name": "Rio"}))).unwrap();

    let provider = ScriptedProvider::new(["R", "{}"]);
    let reply = ask::handle(&provider, &store, "123", "who am i")
        .await
        .unwrap();

    assert_eq!(reply.ff_id, "123");
    assert_eq!(reply.reply, "R");
    assert!(reply.saved_memory.is_empty());

    let record = store.load("123").unwrap().unwrap();
    assert_eq!(
        serde_json::Value::Object(record.facts),
        json!({"name": "Rio"})
    );
    assert!(record.updated_at > 0);
}

#[tokio::test]
async fn sqlite_backend_runs_the_same_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.db");
    let store = MemoryBackend::sqlite(path.to_str().unwrap()).unwrap();

    let provider = ScriptedProvider::new(["reply", r#"{"rank": "Heroic"}"#]);
    ask::handle(&provider, &store, "123", "rank enna").await.unwrap();

    assert_eq!(
        serde_json::Value::Object(stored_facts(&store, "123")),
        json!({"rank": "Heroic"})
    );
}
