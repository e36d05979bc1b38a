//! Error taxonomy for retrieval, parsing and reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the single archive request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection refused, timeout, TLS... nothing was received.
    #[error("Failed to reach the weather archive: {0}")]
    Transport(#[from] reqwest::Error),

    /// The archive answered with a non-2xx status.
    #[error("Weather archive request failed with status {status}: {}", truncate_body(.body))]
    Remote { status: u16, body: String },
}

/// What was wrong with a single data row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowErrorKind {
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid date '{0}'")]
    Date(String),

    #[error("{field} is not a number: '{raw}'")]
    Number { field: &'static str, raw: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// `line` is 1-based, counted from the top of the payload.
    #[error("Malformed record on line {line}: {kind}")]
    Row { line: usize, kind: RowErrorKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("Malformed date '{input}': expected {expected}")]
    Malformed {
        input: String,
        expected: &'static str,
    },

    #[error("'{0}' is not a calendar date")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Cannot build a report from an empty dataset")]
    EmptyDataset,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can stop the fetch -> store -> parse pipeline.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_truncates_long_bodies() {
        let err = FetchError::Remote {
            status: 400,
            body: "x".repeat(500),
        };
        let msg = err.to_string();

        assert!(msg.starts_with("Weather archive request failed with status 400"));
        assert!(msg.ends_with("..."));
        assert!(msg.len() < 300);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = format!("{}é", "a".repeat(199));
        assert_eq!(truncate_body(&body), format!("{}...", "a".repeat(199)));
    }

    #[test]
    fn row_error_mentions_line_and_field() {
        let err = ParseError::Row {
            line: 7,
            kind: RowErrorKind::Number {
                field: "humidity",
                raw: "abc".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Malformed record on line 7: humidity is not a number: 'abc'"
        );
    }
}
