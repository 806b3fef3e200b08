//! The provider seam

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A chat-completion backend
///
/// Providers are built once and shared behind an `Arc`. A provider that
/// receives a request carrying a `response_schema` must ask its backend for
/// schema-constrained output; checking the answer is left to
/// [`complete_structured`](crate::complete_structured).
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}
