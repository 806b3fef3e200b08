//! Raw article records as delivered by the news provider

use serde::Deserialize;

/// One entry of the provider's news stream
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawNewsItem {
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<RawContent>,
    /// Present on sponsored entries
    #[serde(default)]
    pub ad: Option<serde_json::Value>,
}

impl RawNewsItem {
    pub fn is_ad(&self) -> bool {
        self.ad.as_ref().is_some_and(|ad| !ad.is_null())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub pub_date: Option<String>,
    pub provider: Option<RawProvider>,
    pub click_through_url: Option<RawLink>,
    pub canonical_url: Option<RawLink>,
    pub metadata: Option<RawMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProvider {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLink {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub editors_pick: Option<bool>,
}

/// Response envelope of the `xhr/ncp` endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct NewsEnvelope {
    pub(crate) data: Option<NewsData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsData {
    #[serde(rename = "tickerStream")]
    pub(crate) ticker_stream: Option<TickerStream>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TickerStream {
    pub(crate) stream: Option<Vec<RawNewsItem>>,
}

impl NewsEnvelope {
    pub(crate) fn into_items(self) -> Vec<RawNewsItem> {
        self.data
            .and_then(|d| d.ticker_stream)
            .and_then(|ts| ts.stream)
            .unwrap_or_default()
    }
}
