mod corpus;
mod extract;
mod fetch;
mod normalize;
mod orchestrate;
mod score;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use crate::corpus::ScoredRecord;

#[derive(Parser)]
#[command(name = "case_scraper", about = "Builds a scored text corpus from A/B-test case-study pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every URL in the list and write the raw corpus
    Scrape {
        /// Text file with one absolute URL per line
        #[arg(short, long, default_value = "case_urls.txt")]
        urls: PathBuf,
        /// Output CSV for the raw corpus
        #[arg(short, long, default_value = "corpus.csv")]
        out: PathBuf,
        /// Pause between requests, in milliseconds
        #[arg(long, default_value = "1000")]
        delay_ms: u64,
    },
    /// Normalize raw body text into cleaned tokens
    Clean {
        /// Raw corpus CSV produced by 'scrape'
        #[arg(short, long, default_value = "corpus.csv")]
        input: PathBuf,
        /// Output CSV for the cleaned corpus
        #[arg(short, long, default_value = "corpus_cleaned.csv")]
        out: PathBuf,
    },
    /// Score cleaned rows by detail keywords and sort best-first
    Score {
        /// Cleaned corpus CSV produced by 'clean'
        #[arg(short, long, default_value = "corpus_cleaned.csv")]
        input: PathBuf,
        /// Output CSV for the scored corpus
        #[arg(short, long, default_value = "corpus_scored.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape { urls, out, delay_ms } => {
            let targets = corpus::load_url_list(&urls)?;
            if targets.is_empty() {
                println!("URL list {} has no entries. Nothing to scrape.", urls.display());
                return Ok(());
            }
            println!("Scraping {} URLs...", targets.len());

            let client = fetch::build_client()?;
            let extractor = extract::RichContentExtractor::new();
            let delay = Duration::from_millis(delay_ms);
            let (records, stats) =
                orchestrate::scrape_urls(&client, &extractor, &targets, delay).await;
            println!(
                "Done: {} attempted, {} ok, {} skipped.",
                stats.total, stats.ok, stats.errors
            );

            if records.is_empty() {
                println!("No pages were fetched; no corpus written.");
                return Ok(());
            }
            corpus::write_raw_corpus(&out, &records)?;
            println!("Raw corpus saved to {}", out.display());
            Ok(())
        }
        Commands::Clean { input, out } => {
            let rows = corpus::read_raw_corpus(&input)?;
            println!("Loaded {} rows from {}", rows.len(), input.display());

            let resources = normalize::TextResources::new();
            let (cleaned, dropped) = normalize::normalize_corpus(&resources, &rows);
            println!(
                "Done: {} attempted, {} cleaned, {} dropped (missing body text).",
                rows.len(),
                cleaned.len(),
                dropped
            );

            if cleaned.is_empty() {
                println!("No rows left after dropping; no cleaned corpus written.");
                return Ok(());
            }
            corpus::write_cleaned_corpus(&out, &cleaned)?;
            println!("Cleaned corpus saved to {}", out.display());
            Ok(())
        }
        Commands::Score { input, out } => {
            let rows = corpus::read_cleaned_corpus(&input)?;
            println!("Loaded {} cleaned rows from {}", rows.len(), input.display());
            if rows.is_empty() {
                println!("Cleaned corpus has no rows; no scored corpus written.");
                return Ok(());
            }

            let total = rows.len();
            let scored = score::score_corpus(rows);
            corpus::write_scored_corpus(&out, &scored)?;
            println!("Done: {} rows scored and sorted.", total);
            print_score_report(&scored);
            println!("\nScored corpus saved to {}", out.display());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_score_report(rows: &[ScoredRecord]) {
    let show = |r: &ScoredRecord| {
        let title = r.title.as_deref().unwrap_or("(no title)");
        println!("{:>3} | {:<40} | {}", r.detail_score, truncate(title, 40), r.url);
    };

    println!("\n--- Top 5 most detailed case studies ---");
    for row in rows.iter().take(5) {
        show(row);
    }

    if rows.len() > 5 {
        println!("\n--- Bottom 5 least detailed case studies ---");
        for row in rows.iter().skip(rows.len().saturating_sub(5)) {
            show(row);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
