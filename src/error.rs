//! Error types for sentry-dump.
//!
//! Error types follow the thiserror pattern and are designed to be
//! informative both for programmatic handling and user-facing display.

use thiserror::Error;

/// Primary error type for sentry-dump operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// HTTP transport failure (connection, TLS, timeout).
    #[error("HTTP request failed: {context}")]
    HttpError {
        /// Context describing the request that failed.
        context: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON event array.
    #[error("Failed to parse response body from {url}: {source}")]
    BodyParseError {
        /// URL whose body failed to parse.
        url: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// A requested field was absent from an event context.
    #[error("Event {event} is missing requested field '{field}'")]
    MissingField {
        /// Name of the missing field.
        field: String,
        /// Zero-based index of the event in accumulation order.
        event: usize,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DumpError {
    /// Create a new HTTP error with context.
    #[must_use]
    pub fn http(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::HttpError {
            context: context.into(),
            source,
        }
    }

    /// Create a new body parse error.
    #[must_use]
    pub fn body_parse(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::BodyParseError {
            url: url.into(),
            source,
        }
    }

    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a new invalid-argument error.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::BodyParseError { .. } => 2,
            Self::MissingField { .. } => 3,
            Self::InvalidArgument { .. } => 5,
            Self::IoError { .. } => 74,
            Self::HttpError { .. } => 1,
        }
    }
}

/// Result type alias for sentry-dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;

impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// General/unspecified error.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Response body parsing failed.
    pub const EXIT_PARSE_ERROR: i32 = 2;
    /// A requested field was missing from an event.
    pub const EXIT_MISSING_FIELD: i32 = 3;
    /// Invalid argument.
    pub const EXIT_INVALID_ARGUMENT: i32 = 5;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = DumpError::MissingField {
            field: "user_id".to_string(),
            event: 3,
        };
        assert_eq!(missing.exit_code(), 3);

        let invalid = DumpError::invalid_argument("max-events", "not a number");
        assert_eq!(invalid.exit_code(), 5);
    }

    #[test]
    fn test_missing_field_display() {
        let err = DumpError::MissingField {
            field: "user_id".to_string(),
            event: 7,
        };
        assert_eq!(
            err.to_string(),
            "Event 7 is missing requested field 'user_id'"
        );
    }
}
