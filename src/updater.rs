//! Fetch, validate, stamp and persist the exchange rate document.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::core::config::AppConfig;
use crate::core::{RateDocument, RateProvider};
use crate::providers::FreeCurrencyApiProvider;
use crate::store::write_atomic;

/// Runs one update against `provider`, writing the stamped document to
/// `output`.
///
/// The response is parsed and validated in memory before anything touches the
/// disk, so on any error the destination keeps its previous contents.
#[instrument(skip(provider, output), fields(output = %output.display()))]
pub async fn update_rates(
    provider: &dyn RateProvider,
    output: &Path,
    now: NaiveDateTime,
) -> Result<RateDocument> {
    let body = provider.fetch_latest().await?;
    debug!(bytes = body.len(), "Fetched exchange rate response");

    let mut document = RateDocument::from_json_str(&body)?;
    document.stamp(now);

    let json = document.to_pretty_json()?;
    write_atomic(output, json.as_bytes())?;

    info!(
        currencies = document.currency_count(),
        update_time = document.update_time().unwrap_or_default(),
        "Updated exchange rates at {}",
        output.display()
    );
    Ok(document)
}

/// Updates the configured destination from the configured provider using the
/// local wall clock.
pub async fn run_update(config: &AppConfig) -> Result<RateDocument> {
    let provider = FreeCurrencyApiProvider::from_config(config)?;
    let output = config.output_path();
    update_rates(&provider, &output, Local::now().naive_local()).await
}
