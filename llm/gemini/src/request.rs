//! Request and response bodies for the generateContent API.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The request body for the generateContent API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The conversation contents.
    pub contents: Vec<Content>,
}

impl Request {
    /// Build a single-turn request from a free-text prompt.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
        }
    }
}

/// A content entry: an ordered list of parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// The content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A text part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// The part text.
    #[serde(default)]
    pub text: String,
}

/// The response body from the generateContent API.
#[derive(Debug, Deserialize)]
pub struct Response {
    /// The generated candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A generated candidate.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// The candidate content.
    #[serde(default)]
    pub content: Content,
}

impl Response {
    /// Extract the generated text: first candidate, first part.
    ///
    /// Any other shape (error body, safety block without content) is an
    /// upstream failure.
    pub fn into_text(self) -> Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| anyhow::anyhow!("no candidates in generateContent response"))
    }
}
