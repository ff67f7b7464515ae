//! Sitemap-Sweep main entry point
//!
//! This is the command-line interface for the Sitemap-Sweep crawler.

use anyhow::Context;
use clap::Parser;
use sitemap_sweep::config::{load_config, validate_email, Config, ProcessorConfig};
use sitemap_sweep::crawler::crawl;
use sitemap_sweep::exit_code;
use sitemap_sweep::output::print_report;
use sitemap_sweep::state::CrawlPhase;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Sitemap-Sweep: a resumable sitemap crawler
///
/// Sitemap-Sweep follows a root XML sitemap through any sitemap indexes,
/// collects every page URL it lists, and writes them sorted, one per line.
/// Interrupt it with Ctrl-C and rerun with --resume to continue.
#[derive(Parser, Debug)]
#[command(name = "sitemap-sweep")]
#[command(version)]
#[command(about = "A resumable sitemap crawler", long_about = None)]
struct Cli {
    /// URL of the root sitemap or sitemap index
    #[arg(value_name = "SITEMAP_URL")]
    sitemap_url: String,

    /// File the discovered URLs are written to
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Stop after collecting this many unique URLs
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    limit: Option<u64>,

    /// Continue from the state file of an interrupted crawl
    #[arg(long)]
    resume: bool,

    /// State file location (default: <OUTPUT>.state.json)
    #[arg(long, value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Minimum delay between requests in seconds (fractions allowed)
    #[arg(long, value_name = "SECS", env = "REQUEST_INTERVAL_SECONDS", value_parser = parse_seconds)]
    interval: Option<Duration>,

    /// Contact e-mail address advertised in the User-Agent header
    #[arg(long, value_name = "ADDR", env = "EMAIL")]
    email: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_processor_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(exit_code::FAILURE);
        }
    };

    tracing::info!(
        "Output: {}, state file: {}",
        config.output_path.display(),
        config.state_path.display()
    );

    match crawl(config).await {
        Ok(outcome) => {
            if !cli.quiet {
                let label = match outcome.phase() {
                    CrawlPhase::LimitReached => "URL limit reached",
                    CrawlPhase::Interrupted => "Interrupted",
                    _ => "Completed",
                };
                print_report(label, outcome.report());
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            ExitCode::from(exit_code::FAILURE)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the run report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_sweep=info,warn"),
            1 => EnvFilter::new("sitemap_sweep=debug,info"),
            2 => EnvFilter::new("sitemap_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Layers defaults, the config file, the environment and CLI flags
fn build_processor_config(cli: &Cli) -> anyhow::Result<ProcessorConfig> {
    let mut file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(email) = &cli.email {
        validate_email(email).context("Invalid --email / EMAIL")?;
        file_config.user_agent.contact_email = email.clone();
    }

    let mut config = ProcessorConfig::from_config(&file_config, &cli.sitemap_url, &cli.output)
        .context("Invalid sitemap URL")?
        .with_resume(cli.resume);

    if let Some(limit) = cli.limit {
        let limit = usize::try_from(limit).context("--limit is too large")?;
        config = config.with_limit(Some(limit));
    }
    if let Some(interval) = cli.interval {
        config = config.with_request_interval(interval);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(state_file) = &cli.state_file {
        config = config.with_state_path(state_file);
    }

    config.validate().context("Invalid run parameters")?;
    Ok(config)
}

/// Parses a non-negative, possibly fractional, number of seconds
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("'{}' is not a valid delay", value))
}
