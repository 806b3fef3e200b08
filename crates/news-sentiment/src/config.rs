//! Configuration for news sentiment analysis

use crate::error::{Result, SentimentError};
use news_utils::{env_or, env_parse};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default LLM model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default news endpoint root
pub const DEFAULT_NEWS_BASE_URL: &str = "https://finance.yahoo.com/";

/// CSS selector for the main article container on Yahoo Finance pages
pub const DEFAULT_ARTICLE_BODY_SELECTOR: &str = r#"div[data-testid="article-body"]"#;

/// Browser user agent; default client agents get rejected by news sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration for news sentiment analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// LLM model used by both the classifier and the analyzer
    pub model: String,

    /// Sampling temperature for LLM calls
    pub temperature: f32,

    /// Maximum tokens per LLM response
    pub max_tokens: usize,

    /// Articles fetched when the caller does not say otherwise
    pub default_articles: usize,

    /// Upper bound on concurrent article scrapes
    pub scrape_concurrency: usize,

    /// Timeout for news and scrape HTTP requests
    pub request_timeout: Duration,

    /// User agent sent when scraping
    pub user_agent: String,

    /// Root URL of the news provider
    pub news_base_url: String,

    /// CSS selector locating the article body in scraped pages
    pub article_body_selector: String,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: 4096,
            default_articles: 10,
            scrape_concurrency: 4,
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            article_body_selector: DEFAULT_ARTICLE_BODY_SELECTOR.to_string(),
        }
    }
}

impl SentimentConfig {
    /// Create a new configuration builder
    pub fn builder() -> SentimentConfigBuilder {
        SentimentConfigBuilder::default()
    }

    /// Defaults overlaid with environment variables
    ///
    /// Reads `OPENAI_MODEL`, `NEWS_SENTIMENT_ARTICLES`,
    /// `NEWS_SENTIMENT_CONCURRENCY`, `NEWS_SENTIMENT_TIMEOUT_SECS` and
    /// `NEWS_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            model: env_or("OPENAI_MODEL", &defaults.model),
            default_articles: env_parse("NEWS_SENTIMENT_ARTICLES")?
                .unwrap_or(defaults.default_articles),
            scrape_concurrency: env_parse("NEWS_SENTIMENT_CONCURRENCY")?
                .unwrap_or(defaults.scrape_concurrency),
            request_timeout: env_parse("NEWS_SENTIMENT_TIMEOUT_SECS")?
                .map_or(defaults.request_timeout, Duration::from_secs),
            news_base_url: env_or("NEWS_API_BASE", &defaults.news_base_url),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(SentimentError::ConfigError(
                "model must not be empty".to_string(),
            ));
        }

        if self.scrape_concurrency == 0 {
            return Err(SentimentError::ConfigError(
                "scrape_concurrency must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(SentimentError::ConfigError(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(SentimentError::ConfigError(
                "request_timeout must be non-zero".to_string(),
            ));
        }

        url::Url::parse(&self.news_base_url)?;

        if scraper::Selector::parse(&self.article_body_selector).is_err() {
            return Err(SentimentError::ConfigError(format!(
                "invalid article body selector: {}",
                self.article_body_selector
            )));
        }

        Ok(())
    }
}

/// Builder for SentimentConfig
#[derive(Debug, Default)]
pub struct SentimentConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    default_articles: Option<usize>,
    scrape_concurrency: Option<usize>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    news_base_url: Option<String>,
    article_body_selector: Option<String>,
}

impl SentimentConfigBuilder {
    /// Set the LLM model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens per LLM response
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the default article count
    pub fn default_articles(mut self, count: usize) -> Self {
        self.default_articles = Some(count);
        self
    }

    /// Set the scrape concurrency bound
    pub fn scrape_concurrency(mut self, workers: usize) -> Self {
        self.scrape_concurrency = Some(workers);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the scraper user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the news provider root URL
    pub fn news_base_url(mut self, url: impl Into<String>) -> Self {
        self.news_base_url = Some(url.into());
        self
    }

    /// Set the article body selector
    pub fn article_body_selector(mut self, selector: impl Into<String>) -> Self {
        self.article_body_selector = Some(selector.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SentimentConfig> {
        let defaults = SentimentConfig::default();

        let config = SentimentConfig {
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            default_articles: self.default_articles.unwrap_or(defaults.default_articles),
            scrape_concurrency: self.scrape_concurrency.unwrap_or(defaults.scrape_concurrency),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            news_base_url: self.news_base_url.unwrap_or(defaults.news_base_url),
            article_body_selector: self
                .article_body_selector
                .unwrap_or(defaults.article_body_selector),
        };

        config.validate()?;
        Ok(config)
    }
}
