//! Analysis result types

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{MergedBundle, ScoreVerdict};

/// Verdict plus the bookkeeping of the run that produced it
#[derive(Debug, Clone, Serialize)]
pub struct NewsAnalysis {
    pub verdict: ScoreVerdict,
    /// Articles returned by the news provider
    pub articles_analyzed: usize,
    /// Articles the classifier flagged as important
    pub important_articles: usize,
    /// Articles carrying scraped text or a scrape failure message
    pub enriched_articles: usize,
    /// The bundle handed to the analyzer
    pub merged: MergedBundle,
    pub analyzed_at: DateTime<Utc>,
}

impl NewsAnalysis {
    pub fn new(verdict: ScoreVerdict, merged: MergedBundle) -> Self {
        Self {
            verdict,
            articles_analyzed: merged.total_articles(),
            important_articles: merged.important_count(),
            enriched_articles: merged.enriched_count(),
            merged,
            analyzed_at: Utc::now(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.verdict.ticker
    }

    pub fn summary(&self) -> String {
        format!(
            "{} news sentiment {}/100 ({}, {} confidence) from {} articles, {} important ({})",
            self.verdict.ticker,
            self.verdict.score,
            self.verdict.sentiment,
            self.verdict.confidence,
            self.articles_analyzed,
            self.important_articles,
            self.analyzed_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
