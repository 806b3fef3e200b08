//! Joins articles with importance decisions and enriches the important ones

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{Result, SentimentError};
use crate::models::{ImportanceDecision, MergedArticle, MergedBundle, NewsBundle};
use crate::scraper::ArticleTextSource;

/// Merges classifier output back onto a [`NewsBundle`]
pub struct Merger {
    scraper: Arc<dyn ArticleTextSource>,
    concurrency: usize,
}

impl Merger {
    /// `concurrency` bounds in-flight scrapes and is clamped to at least 1
    pub fn new(scraper: Arc<dyn ArticleTextSource>, concurrency: usize) -> Self {
        Self {
            scraper,
            concurrency: concurrency.max(1),
        }
    }

    /// Attach every decision to its article and scrape the important ones
    ///
    /// An article is scraped if and only if it is important and has a URL.
    /// Scrape failures are stored as the article text; they never fail the
    /// merge. Output order and length match `bundle`.
    #[instrument(skip_all, fields(ticker = bundle.ticker(), articles = bundle.total_articles()))]
    pub async fn merge(
        &self,
        bundle: &NewsBundle,
        decisions: &[ImportanceDecision],
    ) -> Result<MergedBundle> {
        let ordered = align_decisions(bundle.total_articles(), decisions)?;

        let to_scrape = bundle
            .articles()
            .iter()
            .zip(&ordered)
            .filter(|(article, decision)| decision.importance && article.has_url())
            .count();
        debug!(to_scrape, concurrency = self.concurrency, "Enriching important articles");

        let articles: Vec<MergedArticle> = stream::iter(bundle.articles().iter().zip(ordered))
            .map(|(article, decision)| {
                let scraper = Arc::clone(&self.scraper);
                async move {
                    let text = if decision.importance && article.has_url() {
                        scraper.scrape(&article.url).await.into_text()
                    } else {
                        String::new()
                    };
                    MergedArticle::new(article, decision, text)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let merged = MergedBundle::new(bundle.ticker(), articles);
        info!(
            important = merged.important_count(),
            enriched = merged.enriched_count(),
            "Merged importance decisions"
        );
        Ok(merged)
    }
}

/// Order decisions by `article_index`, one per article
///
/// Fails on an out-of-range index, a duplicate index, or a missing article.
pub fn align_decisions(
    total: usize,
    decisions: &[ImportanceDecision],
) -> Result<Vec<&ImportanceDecision>> {
    let mut slots: Vec<Option<&ImportanceDecision>> = vec![None; total];

    for decision in decisions {
        let index = decision.article_index;
        let slot = slots.get_mut(index).ok_or_else(|| {
            SentimentError::InvalidDecisions(format!(
                "article index {index} out of range for {total} articles"
            ))
        })?;
        if slot.is_some() {
            return Err(SentimentError::InvalidDecisions(format!(
                "duplicate decision for article {index}"
            )));
        }
        *slot = Some(decision);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                SentimentError::InvalidDecisions(format!("missing decision for article {index}"))
            })
        })
        .collect()
}
