//! `teamlens-llm` — typed client for the Anthropic Messages HTTP API.
//!
//! The rest of the workspace treats generation as an opaque text-completion
//! collaborator: build a [`MessagesRequest`], call [`Client::complete`], get
//! a `String` back. Prompt construction and output parsing live with the
//! callers.

pub mod client;
pub mod error;
pub mod types;

pub use client::Client;
pub use error::LlmError;
pub use types::{ChatMessage, ContentBlock, MessagesRequest, MessagesResponse, Role, TokenUsage};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, LlmError>;
