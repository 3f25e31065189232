use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use crate::corpus::PageRecord;
use crate::extract::ExtractStrategy;
use crate::fetch;

/// Scrape stats returned after completion.
pub struct ScrapeStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Fetch every URL in order, one at a time, with a fixed politeness delay
/// between attempts. A failed fetch is skipped; the record order of the
/// returned corpus matches the input URL order restricted to successes.
pub async fn scrape_urls(
    client: &Client,
    extractor: &dyn ExtractStrategy,
    urls: &[String],
    delay: Duration,
) -> (Vec<PageRecord>, ScrapeStats) {
    let total = urls.len();
    let mut records = Vec::new();
    let mut errors = 0usize;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .expect("valid progress template")
            .progress_chars("=> "),
    );

    for (i, url) in urls.iter().enumerate() {
        info!("Fetching {} of {}: {}", i + 1, total, url);
        match fetch::fetch_page(client, extractor, url).await {
            Ok(record) => records.push(record),
            Err(failure) => {
                warn!("Fetch failed for {}: {}", failure.url, failure.reason);
                errors += 1;
            }
        }
        pb.inc(1);

        // Polite pause between requests, success or not.
        if i + 1 < total {
            tokio::time::sleep(delay).await;
        }
    }

    pb.finish_and_clear();
    let ok = records.len();
    info!("Fetched {} pages ({} ok, {} errors)", total, ok, errors);

    (records, ScrapeStats { total, ok, errors })
}
