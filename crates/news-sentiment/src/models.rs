//! Data model shared by every pipeline stage
//!
//! All values are built once and never mutated. Position inside a bundle is
//! an article's identity: `articles[i]` of a [`NewsBundle`] corresponds to
//! `articles[i]` of the [`MergedBundle`] derived from it.
//!
//! Field names serialize in camelCase because these structures are handed to
//! the LLM verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub pub_date: Option<String>,
    pub provider: Option<String>,
    /// Click-through URL, empty when the provider gave none
    pub url: String,
    pub editors_pick: Option<bool>,
}

impl Article {
    /// Whether the article can be scraped at all
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Normalized articles for one ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsBundle {
    ticker: String,
    total_articles: usize,
    articles: Vec<Article>,
}

impl NewsBundle {
    /// Create a bundle; `total_articles` is derived from `articles`
    pub fn new(ticker: impl Into<String>, articles: Vec<Article>) -> Self {
        Self {
            ticker: ticker.into(),
            total_articles: articles.len(),
            articles,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn total_articles(&self) -> usize {
        self.total_articles
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// The classifier's verdict on one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportanceDecision {
    /// 0-based position of the article in the classified bundle
    pub article_index: usize,
    pub importance: bool,
    pub reason: String,
}

impl ImportanceDecision {
    pub fn new(article_index: usize, importance: bool, reason: impl Into<String>) -> Self {
        Self {
            article_index,
            importance,
            reason: reason.into(),
        }
    }
}

/// Raw classifier response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportanceResponse {
    pub ticker: String,
    pub decisions: Vec<ImportanceDecision>,
}

/// An article joined with its importance decision and scraped text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedArticle {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub pub_date: Option<String>,
    pub provider: Option<String>,
    pub editors_pick: Option<bool>,
    pub importance: bool,
    pub reason: String,
    /// Full text for important articles, a failure description when the
    /// scrape failed, empty otherwise
    pub article_text: String,
}

impl MergedArticle {
    /// Join an article with its decision and (possibly empty) text
    pub fn new(article: &Article, decision: &ImportanceDecision, article_text: String) -> Self {
        Self {
            title: article.title.clone(),
            summary: article.summary.clone(),
            pub_date: article.pub_date.clone(),
            provider: article.provider.clone(),
            editors_pick: article.editors_pick,
            importance: decision.importance,
            reason: decision.reason.clone(),
            article_text,
        }
    }
}

/// Articles after triage and enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedBundle {
    ticker: String,
    total_articles: usize,
    articles: Vec<MergedArticle>,
}

impl MergedBundle {
    /// Create a bundle; `total_articles` is derived from `articles`
    pub fn new(ticker: impl Into<String>, articles: Vec<MergedArticle>) -> Self {
        Self {
            ticker: ticker.into(),
            total_articles: articles.len(),
            articles,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn total_articles(&self) -> usize {
        self.total_articles
    }

    pub fn articles(&self) -> &[MergedArticle] {
        &self.articles
    }

    /// Number of articles the classifier flagged as important
    pub fn important_count(&self) -> usize {
        self.articles.iter().filter(|a| a.importance).count()
    }

    /// Number of articles carrying non-empty text
    pub fn enriched_count(&self) -> usize {
        self.articles
            .iter()
            .filter(|a| !a.article_text.is_empty())
            .count()
    }
}

/// Overall market direction reported by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub const ALL: [&'static str; 3] = ["Bullish", "Bearish", "Neutral"];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sure the analyzer is of its verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const ALL: [&'static str; 3] = ["High", "Medium", "Low"];

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rubric band a score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    VeryBearish,
    Bearish,
    Neutral,
    Bullish,
    VeryBullish,
}

impl ScoreBand {
    /// 0-20, 21-40, 41-59, 60-79, 80-100
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => ScoreBand::VeryBearish,
            21..=40 => ScoreBand::Bearish,
            41..=59 => ScoreBand::Neutral,
            60..=79 => ScoreBand::Bullish,
            _ => ScoreBand::VeryBullish,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::VeryBearish => "Very bearish",
            ScoreBand::Bearish => "Bearish",
            ScoreBand::Neutral => "Neutral",
            ScoreBand::Bullish => "Bullish",
            ScoreBand::VeryBullish => "Very bullish",
        }
    }
}

/// Aggregate verdict for a ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVerdict {
    pub ticker: String,
    /// 0 (very bearish) to 100 (very bullish)
    pub score: u8,
    pub sentiment: Sentiment,
    pub confidence: Confidence,
    pub reason: String,
}

impl ScoreVerdict {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(url: &str) -> Article {
        Article {
            id: Some("a1".to_string()),
            title: Some("Apple beats estimates".to_string()),
            summary: None,
            pub_date: Some("2026-10-15T13:00:00Z".to_string()),
            provider: Some("Reuters".to_string()),
            url: url.to_string(),
            editors_pick: None,
        }
    }

    #[test]
    fn test_bundle_total_tracks_articles() {
        let bundle = NewsBundle::new("AAPL", vec![article("u1"), article("")]);
        assert_eq!(bundle.total_articles(), bundle.articles().len());
        assert_eq!(bundle.total_articles(), 2);

        let empty = NewsBundle::new("AAPL", Vec::new());
        assert_eq!(empty.total_articles(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_article_serializes_nulls_in_camel_case() {
        let value = serde_json::to_value(article("")).unwrap();
        assert_eq!(value["summary"], json!(null));
        assert_eq!(value["editorsPick"], json!(null));
        assert_eq!(value["pubDate"], "2026-10-15T13:00:00Z");
        assert_eq!(value["url"], "");
    }

    #[test]
    fn test_merged_article_carries_fields() {
        let decision = ImportanceDecision::new(0, true, "earnings beat");
        let merged = MergedArticle::new(&article("u1"), &decision, "Full text".to_string());

        assert_eq!(merged.title.as_deref(), Some("Apple beats estimates"));
        assert_eq!(merged.provider.as_deref(), Some("Reuters"));
        assert!(merged.importance);
        assert_eq!(merged.reason, "earnings beat");

        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["articleText"], "Full text");
    }

    #[test]
    fn test_decision_deserializes_from_camel_case() {
        let decision: ImportanceDecision =
            serde_json::from_value(json!({"articleIndex": 2, "importance": false, "reason": "noise"}))
                .unwrap();
        assert_eq!(decision, ImportanceDecision::new(2, false, "noise"));
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::VeryBearish);
        assert_eq!(ScoreBand::from_score(20), ScoreBand::VeryBearish);
        assert_eq!(ScoreBand::from_score(21), ScoreBand::Bearish);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Neutral);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Bullish);
        assert_eq!(ScoreBand::from_score(100), ScoreBand::VeryBullish);
    }

    #[test]
    fn test_verdict_labels_round_trip_through_json() {
        let verdict: ScoreVerdict = serde_json::from_value(json!({
            "ticker": "AAPL",
            "score": 68,
            "sentiment": "Bullish",
            "confidence": "Medium",
            "reason": "Strong services growth"
        }))
        .unwrap();

        assert_eq!(verdict.sentiment, Sentiment::Bullish);
        assert_eq!(verdict.confidence.to_string(), "Medium");
        assert_eq!(verdict.band(), ScoreBand::Bullish);
    }
}
