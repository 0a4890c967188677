//! Command-line interface for sentry-dump.
//!
//! One operation: scrape the paginated event feed of a Sentry issue and
//! print selected context fields as CSV on stdout. All diagnostics go to
//! stderr so the CSV stream stays clean.

use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::info;

use crate::client::{SentryClient, DEFAULT_TIMEOUT_SECS};
use crate::csv::CsvWriter;
use crate::error::Result;
use crate::scrape::{self, Scraper};

/// Dump per-event context fields from a Sentry issue to CSV.
#[derive(Debug, Parser)]
#[command(name = "sentry-dump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Your Sentry bearer token (a hexadecimal string, see https://sentry.io/api/).
    #[arg(
        short = 'b',
        long,
        value_name = "token_hash",
        env = "SENTRY_BEARER_TOKEN",
        hide_env_values = true
    )]
    pub bearer_token: String,

    /// The Sentry issue id.
    #[arg(short = 'i', long, value_name = "id")]
    pub issue: String,

    /// Stop fetching further pages once more than this many events have been
    /// collected (zero or negative means unbounded). Events already on hand
    /// past the limit are still emitted.
    #[arg(short = 'n', long, value_name = "count", allow_negative_numbers = true)]
    pub max_events: Option<i64>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "seconds", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info", env = "SENTRY_DUMP_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact).
    #[arg(long, default_value = "text", env = "SENTRY_DUMP_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// The field names you wish to capture; defines CSV column order.
    #[arg(value_name = "field_name", required = true, num_args = 1..)]
    pub fields: Vec<String>,
}

impl Cli {
    /// Effective event limit: `--max-events` values of zero or below mean
    /// unbounded.
    #[must_use]
    pub fn effective_max_events(&self) -> Option<usize> {
        self.max_events
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
    }
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Errors, warnings, and informational messages.
    #[default]
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
}

/// Initialize tracing/logging based on CLI options. Everything goes to
/// stderr; stdout is reserved for the CSV report.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let client = SentryClient::new(
        &cli.bearer_token,
        Duration::from_secs(cli.timeout_secs),
    )?;
    let scraper = Scraper::new(client).with_max_events(cli.effective_max_events());
    let contexts = scraper.scrape(&cli.issue)?;

    info!("generating csv...");
    let rows: Vec<_> = contexts
        .iter()
        .map(|context| scrape::filter_context(context, &cli.fields))
        .map(|context| scrape::decode_context(&context))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    CsvWriter::new().write_report(&mut out, &cli.fields, &rows)?;
    out.flush()?;

    Ok(())
}
