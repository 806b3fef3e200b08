//! Schema-constrained LLM completions for news-sentiment
//!
//! Callers describe the JSON they expect with a [`ResponseSchema`], send a
//! [`CompletionRequest`] through any [`LLMProvider`], and get back a typed
//! value via [`complete_structured`]. Replies that are not JSON or that break
//! the schema surface as [`LLMError`] and are never retried.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod schema;
pub mod structured;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use schema::{ResponseSchema, SchemaViolation};
pub use structured::complete_structured;

#[cfg(feature = "openai")]
pub mod providers;
