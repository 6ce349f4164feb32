//! ffai gateway -- application shell composing config, the Gemini
//! provider, the memory backend, and the ask pipeline behind an axum
//! server.

pub mod ask;
pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod prompt;
pub mod serve;
pub mod state;
pub mod utils;

pub use ask::AskReply;
pub use backend::MemoryBackend;
pub use config::GatewayConfig;
pub use error::AskError;
pub use serve::{ServeHandle, serve, serve_with_config};
pub use state::AppState;
