//! Best-effort article text scraping
//!
//! Scraping never fails the pipeline. Every problem is reported as a
//! [`ScrapeOutcome::Failed`] carrying a readable message, and the merger
//! stores that message as the article text.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::config::SentimentConfig;
use crate::error::{Result, SentimentError};

/// Result of scraping one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// Paragraph text, each paragraph followed by a newline
    Text(String),
    /// Human-readable failure description
    Failed(String),
}

impl ScrapeOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ScrapeOutcome::Failed(_))
    }

    /// The string stored as `articleText`
    pub fn into_text(self) -> String {
        match self {
            ScrapeOutcome::Text(text) | ScrapeOutcome::Failed(text) => text,
        }
    }
}

/// Anything able to turn an article URL into text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleTextSource: Send + Sync {
    async fn scrape(&self, url: &str) -> ScrapeOutcome;
}

/// Reasons a downloaded page yields no article text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("article body not found")]
    BodyNotFound,
}

/// HTTP scraper for Yahoo Finance article pages
#[derive(Debug, Clone)]
pub struct ArticleScraper {
    client: Client,
    body_selector: Selector,
    paragraph_selector: Selector,
}

impl ArticleScraper {
    pub fn new(config: &SentimentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            body_selector: parse_selector(&config.article_body_selector)?,
            paragraph_selector: parse_selector("p")?,
        })
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl ArticleTextSource for ArticleScraper {
    #[instrument(skip(self))]
    async fn scrape(&self, url: &str) -> ScrapeOutcome {
        let html = match self.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Article fetch failed");
                return ScrapeOutcome::Failed(format!("Error fetching the URL: {e}"));
            }
        };

        match extract_article_text(&html, &self.body_selector, &self.paragraph_selector) {
            Ok(text) => {
                debug!(chars = text.len(), "Scraped article");
                ScrapeOutcome::Text(text)
            }
            Err(e) => {
                warn!(error = %e, "Article body missing");
                ScrapeOutcome::Failed(format!("Error scraping article: {e}"))
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        SentimentError::ConfigError(format!("invalid CSS selector '{selector}': {e}"))
    })
}

/// Concatenate the text of every paragraph inside the first body match
///
/// Each paragraph is followed by `'\n'`. A body without paragraphs yields
/// an empty string.
pub fn extract_article_text(
    html: &str,
    body_selector: &Selector,
    paragraph_selector: &Selector,
) -> std::result::Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let body = document
        .select(body_selector)
        .next()
        .ok_or(ScrapeError::BodyNotFound)?;

    let mut text = String::new();
    for p in body.select(paragraph_selector) {
        text.extend(p.text());
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ARTICLE_BODY_SELECTOR, DEFAULT_USER_AGENT};
    use httpmock::{Method::GET, MockServer};

    const ARTICLE_PAGE: &str = r#"
        <html><body>
          <header><p>Navigation</p></header>
          <div data-testid="article-body">
            <p>Apple reported record revenue.</p>
            <div class="ad"><span>Sponsored</span></div>
            <p>Services grew <strong>14%</strong> year over year.</p>
          </div>
          <footer><p>Footer</p></footer>
        </body></html>
    "#;

    fn extract(html: &str) -> std::result::Result<String, ScrapeError> {
        let body = Selector::parse(DEFAULT_ARTICLE_BODY_SELECTOR).unwrap();
        let paragraph = Selector::parse("p").unwrap();
        extract_article_text(html, &body, &paragraph)
    }

    fn scraper_for_tests() -> ArticleScraper {
        ArticleScraper::new(&SentimentConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_joins_paragraphs_in_body_only() {
        let text = extract(ARTICLE_PAGE).unwrap();
        assert_eq!(
            text,
            "Apple reported record revenue.\nServices grew 14% year over year.\n"
        );
    }

    #[test]
    fn test_extract_missing_body() {
        let html = "<html><body><p>Subscribe to read</p></body></html>";
        assert_eq!(extract(html), Err(ScrapeError::BodyNotFound));
    }

    #[test]
    fn test_extract_body_without_paragraphs_is_empty() {
        let html = r#"<div data-testid="article-body"><span>video</span></div>"#;
        assert_eq!(extract(html).unwrap(), "");
    }

    #[test]
    fn test_outcome_into_text() {
        assert_eq!(ScrapeOutcome::Text("body\n".into()).into_text(), "body\n");
        let failed = ScrapeOutcome::Failed("Error fetching the URL: 404".into());
        assert!(failed.is_failed());
        assert_eq!(failed.into_text(), "Error fetching the URL: 404");
    }

    #[tokio::test]
    async fn test_scrape_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/news/apple.html");
            then.status(200)
                .header("content-type", "text/html")
                .body(ARTICLE_PAGE);
        });

        let outcome = scraper_for_tests()
            .scrape(&server.url("/news/apple.html"))
            .await;
        mock.assert();

        assert_eq!(
            outcome,
            ScrapeOutcome::Text(
                "Apple reported record revenue.\nServices grew 14% year over year.\n".into()
            )
        );
    }

    #[tokio::test]
    async fn test_scrape_http_error_becomes_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        });

        let outcome = scraper_for_tests().scrape(&server.url("/gone")).await;
        match outcome {
            ScrapeOutcome::Failed(msg) => {
                assert!(msg.starts_with("Error fetching the URL:"));
                assert!(msg.contains("404"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scrape_missing_body_becomes_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/paywalled");
            then.status(200).body("<html><body><p>Subscribe</p></body></html>");
        });

        let outcome = scraper_for_tests().scrape(&server.url("/paywalled")).await;
        assert_eq!(
            outcome,
            ScrapeOutcome::Failed("Error scraping article: article body not found".into())
        );
    }

    #[tokio::test]
    async fn test_scrape_sends_browser_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ua")
                .header("user-agent", DEFAULT_USER_AGENT);
            then.status(200).body(ARTICLE_PAGE);
        });

        let outcome = scraper_for_tests().scrape(&server.url("/ua")).await;
        mock.assert();
        assert!(!outcome.is_failed());
    }
}
