use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use scraper::Html;
use tracing::warn;

use crate::corpus::PageRecord;
use crate::extract::ExtractStrategy;

const USER_AGENT: &str = "case-scraper/0.1 (corpus builder)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failure for one URL. A reported outcome, not a raised
/// error: the batch skips the URL and moves on.
#[derive(Debug)]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

/// Shared HTTP client with a fixed identifying User-Agent and timeout.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch one case-study page and extract its title and body text.
///
/// Only transport problems (connect/timeout/DNS, non-2xx status) fail the
/// fetch. A page missing the expected structure still yields a record with
/// the affected fields set to `None`.
pub async fn fetch_page(
    client: &Client,
    extractor: &dyn ExtractStrategy,
    url: &str,
) -> Result<PageRecord, FetchFailure> {
    let fail = |reason: String| FetchFailure {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fail(e.to_string()))?;
    let response = response.error_for_status().map_err(|e| fail(e.to_string()))?;
    let html = response.text().await.map_err(|e| fail(e.to_string()))?;

    let content = {
        let doc = Html::parse_document(&html);
        extractor.extract(&doc)
    };
    if content.title.is_none() {
        warn!("No title found for {}", url);
    }
    if content.body_text.is_none() {
        warn!("No body text found for {}", url);
    }

    Ok(PageRecord {
        url: url.to_string(),
        title: content.title,
        body_text: content.body_text,
    })
}
