//! News provider clients

pub mod wire;
pub mod yahoo;

pub use wire::{RawContent, RawLink, RawMetadata, RawNewsItem, RawProvider};
pub use yahoo::YahooNewsClient;

use crate::error::Result;
use async_trait::async_trait;

/// Source of raw news records for a ticker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch up to `count` of the most recent records for `ticker`, newest first
    async fn fetch_news(&self, ticker: &str, count: usize) -> Result<Vec<RawNewsItem>>;
}
