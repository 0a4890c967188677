//! Restricted literal decoding for serialized context values.
//!
//! Sentry presents most custom context values as the reporting runtime's
//! literal representation: `42`, `3.25`, `u'foo'`, `2016-11-12`. This module
//! turns those back into typed values before CSV emission.
//!
//! The parser recognizes only quoted strings, integers, floating point
//! numbers, and ISO-8601-like date/datetime patterns. It is deliberately not
//! a general expression evaluator; API responses are untrusted input, and a
//! value that does not match any recognized literal form is passed through
//! unchanged.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// A decoded literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal, e.g. `42` or `-7`.
    Int(i64),
    /// Floating point literal, e.g. `3.25` or `1e5`.
    Float(f64),
    /// Quoted string literal with the quotes (and any `u`/`U` repr prefix)
    /// stripped.
    Str(String),
    /// Calendar date, e.g. `2016-11-12`.
    Date(NaiveDate),
    /// Datetime without a UTC offset, e.g. `2016-11-12T08:30:00`.
    DateTime(NaiveDateTime),
    /// Datetime carrying a UTC offset, e.g. `2016-11-12T08:30:00+01:00`.
    DateTimeTz(DateTime<FixedOffset>),
}

impl Literal {
    /// Render the decoded value for CSV output.
    ///
    /// Calendar dates render as ISO-8601 `YYYY-MM-DD`; datetimes keep their
    /// time component in ISO-8601 form.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Self::DateTimeTz(dt) => dt.to_rfc3339(),
        }
    }
}

/// Attempt to decode a serialized value as a restricted literal.
///
/// Returns `None` when the input matches no recognized literal form; the
/// caller is expected to keep the original string in that case.
#[must_use]
pub fn parse_literal(raw: &str) -> Option<Literal> {
    if let Some(unquoted) = strip_quotes(raw) {
        return Some(Literal::Str(unquoted.to_string()));
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Some(Literal::Int(n));
    }

    // Gate on '.' or an exponent so bare words accepted by the f64 parser
    // ("inf", "nan") stay undecoded.
    if raw.contains(['.', 'e', 'E']) {
        if let Ok(f) = raw.parse::<f64>() {
            return Some(Literal::Float(f));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Literal::DateTimeTz(dt));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Literal::DateTime(dt));
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Literal::Date(d));
    }

    None
}

/// Decode a serialized value and render it for output, keeping the original
/// text when it is not a recognized literal.
#[must_use]
pub fn decode_to_string(raw: &str) -> String {
    parse_literal(raw).map_or_else(|| raw.to_string(), |lit| lit.render())
}

/// Strip one level of matching quotes, tolerating a `u`/`U` repr prefix.
fn strip_quotes(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix(['u', 'U']).unwrap_or(raw);
    for quote in ['\'', '"'] {
        if body.len() >= 2 && body.starts_with(quote) && body.ends_with(quote) {
            return Some(&body[1..body.len() - 1]);
        }
    }
    None
}
