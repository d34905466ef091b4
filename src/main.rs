//! # Cyber Articles
//!
//! Scrapes two security-news sites for articles published today, extracts
//! structured metadata and full article text, and persists the aggregate as
//! one JSON document in object storage (or a local directory).
//!
//! ## Usage
//!
//! ```sh
//! # Scheduled mode: scrape every 12 hours, write to the configured bucket
//! cyber_articles
//!
//! # One manual run into a local directory
//! cyber_articles --once -o ./out
//! ```
//!
//! ## Architecture
//!
//! Each run follows the same pipeline:
//! 1. **Listing**: fetch each site's front page and extract today's entries
//! 2. **Content**: fetch every retained article and fill in its body text
//! 3. **Persist**: serialize the site-keyed document and hand it to the sink
//!
//! Per-site and per-article failures degrade to empty results; only a
//! misconfigured site identifier or a failed persist aborts a run.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod errors;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::{BlobSink, DocumentSink, FileSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("cyber_articles starting up");

    let args = Cli::parse();

    let sink: Box<dyn DocumentSink> = match &args.output_dir {
        Some(dir) => Box::new(FileSink::new(dir.clone())),
        None => Box::new(BlobSink::new(args.bucket.clone()).await),
    };

    if args.once {
        return run_once(sink.as_ref()).await;
    }

    let period = Duration::from_secs(args.interval_hours * 3600);
    info!(interval_hours = args.interval_hours, "Entering scheduled mode");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut scheduled_for = tokio::time::Instant::now();

    loop {
        let fired_at = ticker.tick().await;
        if fired_at > scheduled_for + Duration::from_secs(60) {
            warn!(
                late_secs = (fired_at - scheduled_for).as_secs(),
                "Scheduled run is past due"
            );
        }
        scheduled_for = fired_at + period;

        // A failed run is logged and the schedule keeps going; the next tick
        // starts from a clean slate.
        if let Err(e) = run_once(sink.as_ref()).await {
            error!(error = %e, "Run failed");
        }
    }
}

/// One complete scrape-and-persist cycle against today's reference date.
async fn run_once(sink: &dyn DocumentSink) -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();
    let reference_date = Local::now().date_naive();
    info!(%reference_date, "Starting scrape run");

    let document = aggregator::run(reference_date).await?;
    let name = aggregator::object_name(reference_date);
    sink.persist(&document, &name).await?;

    info!(
        object = %name,
        sites = ?document.sites().collect::<Vec<_>>(),
        articles = document.article_count(),
        elapsed_secs = start.elapsed().as_secs(),
        "Run complete"
    );
    Ok(())
}
