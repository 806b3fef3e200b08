//! News Analysis Engine - extractor, classifier, merger and analyzer in sequence

use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::context::AnalysisContext;
use super::result::NewsAnalysis;
use crate::agents::{ImportanceClassifier, ScoreAnalyzer};
use crate::error::{Result, SentimentError};
use crate::extractor::NewsExtractor;
use crate::merger::Merger;
use crate::models::ScoreVerdict;

/// Emit a progress event at `info` when verbose, `debug` otherwise
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Runs the three-stage news pipeline for one ticker at a time
pub struct NewsAnalysisEngine {
    extractor: NewsExtractor,
    classifier: ImportanceClassifier,
    merger: Merger,
    analyzer: ScoreAnalyzer,
}

impl NewsAnalysisEngine {
    pub fn new(ctx: &AnalysisContext) -> Self {
        let config = Arc::clone(ctx.config());

        Self {
            extractor: NewsExtractor::new(Arc::clone(ctx.news())),
            classifier: ImportanceClassifier::new(Arc::clone(ctx.provider()), Arc::clone(&config)),
            merger: Merger::new(Arc::clone(ctx.scraper()), config.scrape_concurrency),
            analyzer: ScoreAnalyzer::new(Arc::clone(ctx.provider()), config),
        }
    }

    /// Score the latest `num_articles` news articles for `ticker`
    pub async fn analyze(
        &self,
        ticker: &str,
        num_articles: usize,
        verbose: bool,
    ) -> Result<ScoreVerdict> {
        Ok(self.analyze_detailed(ticker, num_articles, verbose).await?.verdict)
    }

    /// Like [`analyze`](Self::analyze) but keeps the merged bundle and counts
    ///
    /// `verbose` only changes the level of progress events. Any stage error
    /// aborts the run.
    #[instrument(skip(self))]
    pub async fn analyze_detailed(
        &self,
        ticker: &str,
        num_articles: usize,
        verbose: bool,
    ) -> Result<NewsAnalysis> {
        let ticker = normalize_ticker(ticker)?;

        progress!(verbose, ticker = %ticker, num_articles, "Fetching news articles");
        let bundle = self.extractor.extract(&ticker, num_articles).await?;

        progress!(verbose, articles = bundle.total_articles(), "Classifying article importance");
        let decisions = self.classifier.classify(&bundle).await?;

        progress!(verbose, "Scraping important articles");
        let merged = self.merger.merge(&bundle, &decisions).await?;

        progress!(verbose, important = merged.important_count(), "Scoring news sentiment");
        let verdict = self.analyzer.score(&merged).await?;

        progress!(verbose, score = verdict.score, "Analysis complete");
        Ok(NewsAnalysis::new(verdict, merged))
    }
}

/// Trimmed, upper-cased ticker; blank input is rejected
pub fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(SentimentError::InvalidInput(
            "ticker must not be empty".to_string(),
        ));
    }
    Ok(ticker.to_uppercase())
}

/// Run the whole pipeline with the collaborators in `ctx`
pub async fn analyze_news(
    ctx: &AnalysisContext,
    ticker: &str,
    num_articles: usize,
    verbose: bool,
) -> Result<ScoreVerdict> {
    NewsAnalysisEngine::new(ctx)
        .analyze(ticker, num_articles, verbose)
        .await
}
