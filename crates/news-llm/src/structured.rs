//! Schema-constrained completions
//!
//! [`complete_structured`] is the single place where a provider's text payload
//! becomes a typed value: the request carries the schema, the response is
//! parsed as JSON, checked with [`ResponseSchema::validate`], and only then
//! deserialized.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    CompletionRequest, LLMError, LLMProvider, ResponseSchema, Result, StopReason,
};

/// Run a completion constrained to `schema` and decode the result as `T`
///
/// Any schema already attached to `request` is replaced by `schema`.
pub async fn complete_structured<T>(
    provider: &dyn LLMProvider,
    mut request: CompletionRequest,
    schema: &ResponseSchema,
) -> Result<T>
where
    T: DeserializeOwned,
{
    request.response_schema = Some(schema.clone());

    debug!(
        provider = provider.name(),
        model = %request.model,
        schema = %schema.name,
        "Requesting structured completion"
    );

    let response = provider.complete(request).await?;

    if response.stop_reason == StopReason::MaxTokens {
        warn!(schema = %schema.name, "Structured response truncated at max tokens");
    }

    debug!(
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        "Structured completion received"
    );

    let payload = response.message.text().ok_or_else(|| {
        LLMError::UnexpectedResponse(format!(
            "Empty response for schema '{}' (stop reason: {:?})",
            schema.name, response.stop_reason
        ))
    })?;

    parse_structured(payload, schema)
}

/// Parse and validate a raw payload against `schema`, then decode it
pub fn parse_structured<T>(payload: &str, schema: &ResponseSchema) -> Result<T>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(strip_code_fence(payload)).map_err(|e| {
        LLMError::UnexpectedResponse(format!(
            "Response for schema '{}' is not valid JSON: {e}",
            schema.name
        ))
    })?;

    schema
        .validate(&value)
        .map_err(|violation| LLMError::SchemaValidation {
            schema: schema.name.clone(),
            violation,
        })?;

    Ok(serde_json::from_value(value)?)
}

/// Some OpenAI-compatible servers wrap JSON output in a Markdown fence
fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}
