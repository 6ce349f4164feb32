//! HTTP surface -- the axum router and the /ask handler.

use crate::ask::{self, AskReply};
use crate::error::AskError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use llm::Generate;
use serde::Deserialize;

/// Query parameters for the /ask endpoint.
///
/// Both fields are required by the contract; they are optional here so
/// validation produces the structured error body instead of an axum
/// rejection.
#[derive(Debug, Deserialize)]
pub struct AskParams {
    /// Player identifier.
    #[serde(default)]
    pub ff_id: Option<String>,
    /// The question to answer.
    #[serde(default)]
    pub q: Option<String>,
}

/// Build the axum router with the /ask endpoint.
pub fn router<G: Generate + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/ask", get(ask_handler::<G>))
        .with_state(state)
}

/// The /ask endpoint: answer a question and remember the player.
async fn ask_handler<G: Generate + 'static>(
    State(state): State<AppState<G>>,
    Query(params): Query<AskParams>,
) -> Result<Json<AskReply>, AskError> {
    let ff_id = params.ff_id.unwrap_or_default();
    let q = params.q.unwrap_or_default();
    let reply = ask::handle(&state.provider, state.memory.as_ref(), &ff_id, &q).await?;
    Ok(Json(reply))
}
