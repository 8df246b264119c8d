//! Exchange rate source abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Fetches the latest rates as the raw response body.
///
/// Parsing and validation happen in the updater so every source goes through
/// the same checks.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<String>;
}
