//! No-op text-generation provider for testing.
//!
//! Implements [`Generate`] but panics on `generate`. Intended for unit
//! tests that exercise validation and store logic without making real
//! model calls.

use crate::Generate;
use anyhow::Result;

/// A no-op provider that panics on any generation call.
///
/// # Panics
///
/// `generate` panics if called. Only use this provider in tests that
/// never reach the model.
#[derive(Clone, Copy)]
pub struct NoopProvider;

impl Generate for NoopProvider {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        panic!("NoopProvider::generate called, not intended for real model calls");
    }
}
