//! Yahoo Finance news client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::NewsSource;
use super::wire::{NewsEnvelope, RawNewsItem};
use crate::config::SentimentConfig;
use crate::error::{Result, SentimentError};

#[derive(Serialize)]
struct ServiceConfig<'a> {
    #[serde(rename = "snippetCount")]
    snippet_count: usize,
    s: [&'a str; 1],
}

#[derive(Serialize)]
struct NewsPayload<'a> {
    #[serde(rename = "serviceConfig")]
    service_config: ServiceConfig<'a>,
}

/// Client for the Yahoo Finance latest-news stream
#[derive(Debug, Clone)]
pub struct YahooNewsClient {
    client: Client,
    base_url: Url,
}

impl YahooNewsClient {
    /// Create a client from the shared configuration
    pub fn new(config: &SentimentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.news_base_url)?,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        let mut url = self.base_url.join("xhr/ncp")?;
        url.query_pairs_mut()
            .append_pair("queryRef", "latestNews")
            .append_pair("serviceKey", "ncp_fin");
        Ok(url)
    }
}

#[async_trait]
impl NewsSource for YahooNewsClient {
    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn fetch_news(&self, ticker: &str, count: usize) -> Result<Vec<RawNewsItem>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let payload = NewsPayload {
            service_config: ServiceConfig {
                snippet_count: count,
                s: [ticker],
            },
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SentimentError::NewsProvider(format!("Yahoo request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::NewsProvider(format!(
                "Yahoo news API error {status}: {body}"
            )));
        }

        let envelope: NewsEnvelope = response.json().await.map_err(|e| {
            SentimentError::NewsProvider(format!("Failed to parse Yahoo news response: {e}"))
        })?;

        let items: Vec<RawNewsItem> = envelope
            .into_items()
            .into_iter()
            .filter(|item| !item.is_ad())
            .take(count)
            .collect();

        debug!(ticker, returned = items.len(), requested = count, "Fetched news stream");
        Ok(items)
    }
}
