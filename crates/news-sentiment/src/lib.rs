//! News sentiment analysis for financial tickers
//!
//! This crate scores the recent news flow of a ticker with an LLM. It
//! includes:
//!
//! - News fetching and normalization (Yahoo Finance news stream)
//! - LLM importance triage of every article from its title and summary
//! - Selective full-text scraping of the articles worth reading
//! - LLM aggregate scoring on a 0-100 bearish-to-bullish scale
//!
//! # Architecture
//!
//! [`NewsAnalysisEngine`] runs four stages in strict sequence:
//! - [`NewsExtractor`]: raw provider records to a [`NewsBundle`]
//! - [`ImportanceClassifier`]: one [`ImportanceDecision`] per article
//! - [`Merger`]: decisions joined onto articles, important ones scraped
//! - [`ScoreAnalyzer`]: the final [`ScoreVerdict`]
//!
//! Both LLM stages use schema-constrained completions, so a malformed model
//! answer is an error rather than a silently wrong verdict.
//!
//! # Example
//!
//! ```rust,ignore
//! use news_sentiment::{AnalysisContext, analyze_news};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = AnalysisContext::from_env()?;
//!     let verdict = analyze_news(&ctx, "AAPL", 10, true).await?;
//!     println!("{}: {}/100 ({})", verdict.ticker, verdict.score, verdict.sentiment);
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod merger;
pub mod models;
pub mod prompts;
pub mod scraper;

pub use agents::{ImportanceClassifier, ScoreAnalyzer};
pub use api::{NewsSource, RawNewsItem, YahooNewsClient};
pub use config::SentimentConfig;
pub use engine::{AnalysisContext, NewsAnalysis, NewsAnalysisEngine, analyze_news};
pub use error::{Result, SentimentError};
pub use extractor::NewsExtractor;
pub use merger::Merger;
pub use models::{
    Article, Confidence, ImportanceDecision, MergedArticle, MergedBundle, NewsBundle, ScoreBand,
    ScoreVerdict, Sentiment,
};
pub use scraper::{ArticleScraper, ArticleTextSource, ScrapeOutcome};
