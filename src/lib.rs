//! Conversation controller for a natural-language-to-SQL chat assistant.
//!
//! The crate owns the chat transcript and the request/response lifecycle of
//! each user turn: a submission becomes a backend request, the structured
//! reply (narrative plus optional SQL, result rows and chart artifact) is
//! folded back into the transcript, and any failure is converted into a
//! recoverable, user-visible state instead of an error. A rendering shell
//! only ever observes [`ChatSnapshot`] values and feeds text back in.
//!
//! ```no_run
//! use std::sync::Arc;
//! use sqlchat::{BackendConfig, ChatController, HttpBackendClient};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = BackendConfig::from_env();
//! let backend = Arc::new(HttpBackendClient::new(&config)?);
//!
//! let mut chat = ChatController::new(backend);
//! chat.initialize().await;
//! chat.send_turn("Show me customer balances by income category").await;
//!
//! for turn in chat.transcript() {
//!     println!("{}: {}", turn.role.as_str(), turn.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod events;
pub mod models;
pub mod state;

pub use api::{GenerateOptions, GenerateReply, HistoryEntry, HttpBackendClient, Text2SqlBackend};
pub use config::BackendConfig;
pub use controller::{format_history, ChatController};
pub use events::{ChatEvent, ChatEventSink, LogSink, NullSink};
pub use models::{ChatRole, ChatTurn, SqlRow};
pub use state::{ChatSnapshot, Connectivity, ProcessingState};
