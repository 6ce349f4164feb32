//! The Gemini text-generation provider.

pub use request::{Candidate, Content, Part, Request, Response};
use llm::{Client, reqwest::header::HeaderMap};

mod generate;
mod request;

/// Default API base URL.
pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// The Gemini text-generation provider.
#[derive(Clone)]
pub struct Gemini {
    /// The HTTP client.
    pub client: Client,

    /// The request headers.
    headers: HeaderMap,

    /// Full generateContent endpoint URL for the configured model.
    endpoint: String,
}

impl Gemini {
    /// Create a provider for the given model against the default base URL.
    pub fn new(client: Client, key: &str, model: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, model, BASE_URL)
    }

    /// Create a provider against a custom base URL.
    pub fn custom(client: Client, key: &str, model: &str, base_url: &str) -> anyhow::Result<Self> {
        use llm::reqwest::header;
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
        headers.insert(header::ACCEPT, "application/json".parse()?);
        headers.insert("x-goog-api-key", key.parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: format!("{base_url}/v1beta/models/{model}:generateContent"),
        })
    }
}
