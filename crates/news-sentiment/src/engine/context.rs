//! Shared collaborators for a pipeline run

use news_llm::LLMProvider;
use news_llm::providers::OpenAIProvider;
use std::sync::Arc;

use crate::api::{NewsSource, YahooNewsClient};
use crate::config::SentimentConfig;
use crate::error::Result;
use crate::scraper::{ArticleScraper, ArticleTextSource};

/// Everything the pipeline talks to
///
/// The LLM provider is built once and shared read-only by every stage.
/// Cloning is cheap.
#[derive(Clone)]
pub struct AnalysisContext {
    provider: Arc<dyn LLMProvider>,
    config: Arc<SentimentConfig>,
    news: Arc<dyn NewsSource>,
    scraper: Arc<dyn ArticleTextSource>,
}

impl AnalysisContext {
    /// Assemble a context from explicit collaborators
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        config: Arc<SentimentConfig>,
        news: Arc<dyn NewsSource>,
        scraper: Arc<dyn ArticleTextSource>,
    ) -> Self {
        Self {
            provider,
            config,
            news,
            scraper,
        }
    }

    /// OpenAI-compatible provider plus Yahoo news and scraping for `config`
    pub fn from_config(config: SentimentConfig) -> Result<Self> {
        config.validate()?;

        let provider = OpenAIProvider::from_env()?;
        let news = YahooNewsClient::new(&config)?;
        let scraper = ArticleScraper::new(&config)?;

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(config),
            Arc::new(news),
            Arc::new(scraper),
        ))
    }

    /// Same as [`from_config`](Self::from_config) with [`SentimentConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::from_config(SentimentConfig::from_env()?)
    }

    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    pub fn config(&self) -> &Arc<SentimentConfig> {
        &self.config
    }

    pub fn news(&self) -> &Arc<dyn NewsSource> {
        &self.news
    }

    pub fn scraper(&self) -> &Arc<dyn ArticleTextSource> {
        &self.scraper
    }
}

impl std::fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
