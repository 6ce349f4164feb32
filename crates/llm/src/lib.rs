//! Unified text-generation interface.
//!
//! The gateway treats the model as an opaque remote function: one
//! free-text prompt in, one free-text completion out. Providers
//! implement [`Generate`]; everything above them is provider-agnostic.

pub use noop::NoopProvider;
pub use reqwest::{self, Client};

mod noop;

use anyhow::Result;

/// A trait for text-generation providers.
pub trait Generate: Clone + Send + Sync {
    /// Generate a completion for a single free-text prompt.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}
