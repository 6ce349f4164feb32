//! Shared application state for the gateway server.

use crate::backend::MemoryBackend;
use llm::Generate;
use std::sync::Arc;

/// Shared state available to all request handlers.
///
/// Built once at startup and cloned per request; the store handle is
/// shared for the process lifetime, no explicit teardown.
pub struct AppState<G: Generate> {
    /// The text-generation provider.
    pub provider: G,
    /// The player memory store.
    pub memory: Arc<MemoryBackend>,
}

impl<G: Generate> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            memory: Arc::clone(&self.memory),
        }
    }
}
