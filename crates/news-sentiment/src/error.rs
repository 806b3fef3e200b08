//! Error types for news sentiment operations
//!
//! Every variant here is fatal for the pipeline run that raised it. Scrape
//! failures never appear in this enum; they travel as
//! [`ScrapeOutcome::Failed`](crate::scraper::ScrapeOutcome) values instead.

use thiserror::Error;

/// News sentiment specific errors
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Invalid caller input (empty ticker, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (missing credential, bad setting)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// News provider returned an error or an unusable payload
    #[error("News provider error: {0}")]
    NewsProvider(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// LLM call failed or its response failed schema validation
    #[error("LLM error: {0}")]
    Llm(#[from] news_llm::LLMError),

    /// Importance decisions do not line up with the article list
    #[error("Invalid importance decisions: {0}")]
    InvalidDecisions(String),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    PromptError(#[from] minijinja::Error),
}

/// Result type alias for news sentiment operations
pub type Result<T> = std::result::Result<T, SentimentError>;

impl From<news_utils::EnvError> for SentimentError {
    fn from(err: news_utils::EnvError) -> Self {
        SentimentError::ConfigError(err.to_string())
    }
}

impl From<url::ParseError> for SentimentError {
    fn from(err: url::ParseError) -> Self {
        SentimentError::ConfigError(format!("Invalid URL: {err}"))
    }
}

impl SentimentError {
    /// Whether the error came from a missing or invalid setting
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SentimentError::ConfigError(_)
                | SentimentError::Llm(news_llm::LLMError::ConfigurationError(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SentimentError::InvalidDecisions("missing decision for article 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid importance decisions: missing decision for article 1"
        );

        let err = SentimentError::NewsProvider("HTTP 503".to_string());
        assert_eq!(err.to_string(), "News provider error: HTTP 503");
    }

    #[test]
    fn test_llm_error_conversion() {
        let llm_err = news_llm::LLMError::ConfigurationError("OPENAI_API_KEY not set".to_string());
        let err: SentimentError = llm_err.into();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_env_error_conversion() {
        let env_err = news_utils::EnvError::Invalid {
            key: "NEWS_SENTIMENT_ARTICLES".to_string(),
            value: "ten".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let err: SentimentError = env_err.into();
        assert!(err.is_configuration());
    }
}
