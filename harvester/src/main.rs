use anyhow::Result;
use clap::Parser;
use cloudcore::clean::StopwordFilter;
use harvester::fetch::PageFetcher;
use harvester::{pipeline, render, report};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "harvester")]
#[command(about = "Scrape faculty research interests into word-frequency tables")]
struct Cli {
    /// Base URL of the A-Z faculty directory
    #[arg(long, default_value = "https://midas.umich.edu/people/affiliated-faculty/")]
    base_url: String,
    /// Directory holding the corpus cache files
    #[arg(long, default_value = "./cache")]
    cache_dir: PathBuf,
    /// Removed-words list, one term per line; must exist
    #[arg(long, default_value = "./removed_words.txt")]
    removed_words: PathBuf,
    /// Output directory for frequency tables and the render manifest
    #[arg(long, default_value = "./output")]
    output: PathBuf,
    /// Concurrent detail-page fetches
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// Fetch attempts per page
    #[arg(long, default_value_t = 3)]
    retries: u32,
    /// User-Agent string for all requests
    #[arg(long, default_value = "research-wordcloud-bot/0.1 (+https://example.com/bot)")]
    user_agent: String,
    /// Ignore cache files and re-scrape both corpora
    #[arg(long, default_value_t = false)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    // Fatal before any network I/O: the removed-words list must be readable.
    let filter = StopwordFilter::from_file(&args.removed_words)?;

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("cancel requested: finishing in-flight fetches");
                cancel.store(true, Ordering::SeqCst);
            }
        });
    }

    let fetcher = PageFetcher::new(&args.user_agent, args.timeout_secs, args.retries)?;
    let config = pipeline::Config {
        base_url: args.base_url,
        cache_dir: args.cache_dir,
        refresh: args.refresh,
        concurrency: args.concurrency,
    };

    let run_report = pipeline::run(&fetcher, &config, &filter, &cancel).await?;

    let jobs = render::write_artifacts(&args.output, &run_report)?;
    println!("{}", report::format_summary(&run_report.stats));
    println!("render jobs written: {} -> {}", jobs, args.output.display());
    Ok(())
}
