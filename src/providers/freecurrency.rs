use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::AppConfig;
use crate::core::rates::RateProvider;

const USER_AGENT: &str = concat!("xrate/", env!("CARGO_PKG_VERSION"));

// FreeCurrencyApiProvider implementation for RateProvider
pub struct FreeCurrencyApiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl FreeCurrencyApiProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!("API key must not be empty");
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(FreeCurrencyApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Self::new(
            &config.provider.base_url,
            &api_key,
            config.provider.timeout(),
        )
    }
}

#[async_trait]
impl RateProvider for FreeCurrencyApiProvider {
    #[instrument(name = "FreeCurrencyFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_latest(&self) -> Result<String> {
        let url = format!("{}/v1/latest", self.base_url);
        debug!("Requesting latest exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        debug!(status = %response.status(), "Received exchange rate response");

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from exchange rate provider",
                response.status()
            ));
        }

        response
            .text()
            .await
            .context("Failed to read exchange rate response body")
    }
}
