//! Errors raised while talking to an LLM provider

use thiserror::Error;

use crate::schema::SchemaViolation;

pub type Result<T> = std::result::Result<T, LLMError>;

/// Every variant is fatal for the call that produced it; nothing here is retried
#[derive(Error, Debug)]
pub enum LLMError {
    /// Provider answered with an unclassified failure status
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    #[error("LLM provider rejected the API key")]
    AuthenticationFailed,

    #[error("LLM rate limit hit: {0}")]
    RateLimitExceeded(String),

    #[error("LLM provider rejected the request: {0}")]
    InvalidRequest(String),

    #[error("Unknown model: {0}")]
    ModelNotFound(String),

    #[error("Could not (de)serialize LLM payload: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Transport error talking to LLM provider: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Reply was empty, refused, or not JSON when JSON was required
    #[error("Unexpected LLM response: {0}")]
    UnexpectedResponse(String),

    /// Structured reply parsed but broke its schema
    #[error("Response does not match schema '{schema}': {violation}")]
    SchemaValidation {
        schema: String,
        violation: SchemaViolation,
    },

    /// Missing credential or unusable provider setting
    #[error("LLM configuration error: {0}")]
    ConfigurationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = LLMError::SchemaValidation {
            schema: "news_importance".to_string(),
            violation: SchemaViolation::new("$.decisions", "expected array, got string"),
        };
        assert_eq!(
            err.to_string(),
            "Response does not match schema 'news_importance': $.decisions: expected array, got string"
        );
    }

    #[test]
    fn test_configuration_error_display() {
        let err = LLMError::ConfigurationError("OPENAI_API_KEY not set".to_string());
        assert_eq!(err.to_string(), "LLM configuration error: OPENAI_API_KEY not set");
    }
}
