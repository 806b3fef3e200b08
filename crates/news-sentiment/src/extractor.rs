//! News extraction and normalization

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::api::{NewsSource, RawNewsItem};
use crate::error::Result;
use crate::models::{Article, NewsBundle};

/// Turns raw provider records into a [`NewsBundle`]
pub struct NewsExtractor {
    source: Arc<dyn NewsSource>,
}

impl NewsExtractor {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }

    /// Fetch up to `count` articles for `ticker` and normalize them
    ///
    /// Fewer records than requested is not an error. Provider failures
    /// propagate unchanged.
    #[instrument(skip(self))]
    pub async fn extract(&self, ticker: &str, count: usize) -> Result<NewsBundle> {
        let raw = self.source.fetch_news(ticker, count).await?;

        let articles: Vec<Article> = raw.iter().take(count).map(normalize).collect();
        debug!(
            requested = count,
            received = articles.len(),
            with_url = articles.iter().filter(|a| a.has_url()).count(),
            "Normalized news articles"
        );

        Ok(NewsBundle::new(ticker, articles))
    }
}

/// Map one raw record onto the fixed article shape
pub fn normalize(raw: &RawNewsItem) -> Article {
    let content = raw.content.as_ref();

    Article {
        id: raw.id.clone(),
        title: content.and_then(|c| c.title.clone()),
        summary: content.and_then(|c| c.summary.clone()),
        pub_date: content.and_then(|c| c.pub_date.clone()),
        provider: content
            .and_then(|c| c.provider.as_ref())
            .and_then(|p| p.display_name.clone()),
        url: resolve_url(raw),
        editors_pick: content
            .and_then(|c| c.metadata.as_ref())
            .and_then(|m| m.editors_pick),
    }
}

/// Click-through URL when present and non-empty, otherwise `""`
///
/// The canonical URL is never used: it often points at pages the scraper
/// cannot read.
pub fn resolve_url(raw: &RawNewsItem) -> String {
    raw.content
        .as_ref()
        .and_then(|c| c.click_through_url.as_ref())
        .and_then(|link| link.url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockNewsSource;
    use crate::error::SentimentError;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawNewsItem {
        serde_json::from_value(value).unwrap()
    }

    fn full_record() -> RawNewsItem {
        raw(json!({
            "id": "9f2c",
            "content": {
                "title": "Apple unveils new chip",
                "summary": "The M5 ships next month.",
                "pubDate": "2026-10-15T13:00:00Z",
                "provider": {"displayName": "Bloomberg"},
                "clickThroughUrl": {"url": "https://finance.yahoo.com/news/apple-chip.html"},
                "canonicalUrl": {"url": "https://www.bloomberg.com/apple-chip"},
                "metadata": {"editorsPick": true}
            }
        }))
    }

    #[test]
    fn test_normalize_full_record() {
        let article = normalize(&full_record());

        assert_eq!(article.id.as_deref(), Some("9f2c"));
        assert_eq!(article.title.as_deref(), Some("Apple unveils new chip"));
        assert_eq!(article.summary.as_deref(), Some("The M5 ships next month."));
        assert_eq!(article.pub_date.as_deref(), Some("2026-10-15T13:00:00Z"));
        assert_eq!(article.provider.as_deref(), Some("Bloomberg"));
        assert_eq!(article.url, "https://finance.yahoo.com/news/apple-chip.html");
        assert_eq!(article.editors_pick, Some(true));
    }

    #[test]
    fn test_canonical_url_is_not_a_fallback() {
        let record = raw(json!({
            "id": "x",
            "content": {
                "title": "Only canonical",
                "clickThroughUrl": null,
                "canonicalUrl": {"url": "https://example.com/canonical"}
            }
        }));
        assert_eq!(resolve_url(&record), "");

        let empty_click = raw(json!({
            "id": "y",
            "content": {
                "clickThroughUrl": {"url": ""},
                "canonicalUrl": {"url": "https://example.com/canonical"}
            }
        }));
        assert_eq!(resolve_url(&empty_click), "");
    }

    #[test]
    fn test_missing_fields_become_none() {
        let article = normalize(&raw(json!({"id": "bare", "content": {"title": "T"}})));
        assert_eq!(article.summary, None);
        assert_eq!(article.provider, None);
        assert_eq!(article.pub_date, None);
        assert_eq!(article.editors_pick, None);
        assert_eq!(article.url, "");

        let no_content = normalize(&raw(json!({"id": "nothing"})));
        assert_eq!(no_content.title, None);
        assert_eq!(no_content.id.as_deref(), Some("nothing"));
    }

    #[tokio::test]
    async fn test_extract_uses_what_is_available() {
        let mut source = MockNewsSource::new();
        source
            .expect_fetch_news()
            .withf(|ticker, count| ticker == "AAPL" && *count == 5)
            .times(1)
            .returning(|_, _| Ok(vec![full_record(), full_record()]));

        let extractor = NewsExtractor::new(Arc::new(source));
        let bundle = extractor.extract("AAPL", 5).await.unwrap();

        assert_eq!(bundle.ticker(), "AAPL");
        assert_eq!(bundle.total_articles(), 2);
        assert_eq!(bundle.total_articles(), bundle.articles().len());
    }

    #[tokio::test]
    async fn test_extract_truncates_to_count_and_is_repeatable() {
        let mut source = MockNewsSource::new();
        source
            .expect_fetch_news()
            .times(2)
            .returning(|_, _| Ok(vec![full_record(), full_record(), full_record()]));

        let extractor = NewsExtractor::new(Arc::new(source));
        let first = extractor.extract("AAPL", 2).await.unwrap();
        let second = extractor.extract("AAPL", 2).await.unwrap();

        assert_eq!(first.total_articles(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mut source = MockNewsSource::new();
        source
            .expect_fetch_news()
            .returning(|_, _| Err(SentimentError::NewsProvider("HTTP 500".to_string())));

        let extractor = NewsExtractor::new(Arc::new(source));
        let result = extractor.extract("AAPL", 3).await;
        assert!(matches!(result, Err(SentimentError::NewsProvider(_))));
    }
}
