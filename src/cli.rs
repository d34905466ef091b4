//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags or environment
//! variables. Storage credentials are deliberately absent: the
//! object-storage client reads them from its environment-backed default
//! chain, so they never appear on a command line or in this struct.

use clap::Parser;

/// Runtime configuration, read once at process start.
///
/// # Examples
///
/// ```sh
/// # Scheduled mode, writing to the default bucket every 12 hours
/// cyber_articles
///
/// # One manual run into a local directory
/// cyber_articles --once -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Object-storage bucket the aggregated JSON document is written to
    #[arg(long, env = "ARTICLES_BUCKET", default_value = "cyber-articles")]
    pub bucket: String,

    /// Write the document to this local directory instead of object storage
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Scrape once and exit instead of staying on the schedule
    #[arg(long)]
    pub once: bool,

    /// Hours between scheduled runs
    #[arg(
        long,
        env = "SCRAPE_INTERVAL_HOURS",
        default_value_t = 12,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_hours: u64,
}
