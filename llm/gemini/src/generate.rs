//! The Generate implementation.

use crate::{Gemini, Request, Response};
use anyhow::Result;
use llm::{Generate, reqwest::Method};

impl Generate for Gemini {
    /// Send a prompt to the generateContent API and return the text of
    /// the first candidate.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = Request::from_prompt(prompt);
        tracing::debug!("request: {}", serde_json::to_string(&body)?);
        let text = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .text()
            .await?;

        tracing::debug!("response: {text}");
        let response: Response = serde_json::from_str(&text)?;
        response.into_text()
    }
}
