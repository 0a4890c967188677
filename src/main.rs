//! sentry-dump: dump selected context fields from a Sentry issue to CSV.
//!
//! Given a Sentry issue id, a bearer token, and a list of field names, this
//! tool walks the issue's paginated event feed and writes a CSV of the
//! collected data to stdout.

use std::process::ExitCode;

use sentry_dump::cli;

fn main() -> ExitCode {
    // Run the CLI (logging is initialized by cli::run based on --log-level
    // and --log-format)
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");

            // Print cause chain in debug mode
            if std::env::var("RUST_BACKTRACE").is_ok() {
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("Caused by: {source}");
                }
            }

            ExitCode::from(e.exit_code() as u8)
        }
    }
}
