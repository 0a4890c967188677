//! sentry-dump: dump per-event context fields from a Sentry issue to CSV.
//!
//! The tool walks the paginated event feed of one Sentry issue over HTTP,
//! collects each event's custom `context` mapping, filters the mappings to a
//! caller-supplied ordered field list, decodes serialized literal values
//! back into typed values (integers, floats, quoted strings, dates), and
//! prints CSV to stdout. Diagnostics go to stderr only.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use sentry_dump::client::SentryClient;
//! use sentry_dump::scrape::Scraper;
//!
//! fn main() -> sentry_dump::Result<()> {
//!     let client = SentryClient::new("my-token", Duration::from_secs(30))?;
//!     let scraper = Scraper::new(client).with_max_events(Some(100));
//!     for context in scraper.scrape("123456")? {
//!         println!("{} fields", context.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`client`]: authenticated blocking HTTP client for the Sentry API
//! - [`link`]: pagination `Link` response-header parsing
//! - [`scrape`]: FIFO pagination loop, context filtering, value decoding
//! - [`literal`]: restricted literal parser for serialized values
//! - [`csv`]: CSV report emission
//! - [`cli`]: command-line interface
//! - [`error`]: error types and exit-code mapping

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod csv;
pub mod error;
pub mod link;
pub mod literal;
pub mod scrape;

// Re-export commonly used types at the crate root
pub use error::{DumpError, Result};
pub use scrape::{EventContext, Scraper};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
