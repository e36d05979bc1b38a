//! Turns the archive's CSV payload into an [`ObservationSet`].
//!
//! The payload starts with a fixed preamble (location metadata header and
//! values, a blank separator, the column header) followed by one line per
//! day: `date,temperature_min,temperature_max,precipitation,humidity`.
//! The preamble is skipped by position and never inspected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    date,
    error::{ParseError, RowErrorKind},
    model::{DailyObservation, ObservationSet},
};

/// Lines before the first data row.
pub const PREAMBLE_LINES: usize = 4;

const FIELD_COUNT: usize = 5;

/// What to do with a data row that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// The first malformed row fails the whole load.
    Abort,
    /// Malformed rows are left out of the set and reported in
    /// [`ParsedFeed::rejected`].
    #[default]
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    pub observations: ObservationSet,
    pub rejected: Vec<ParseError>,
}

/// Parse a raw archive payload.
///
/// Input shorter than the preamble yields an empty set, not an error.
pub fn parse(text: &str, policy: RowPolicy) -> Result<ParsedFeed, ParseError> {
    let mut observations = Vec::new();
    let mut rejected = Vec::new();

    for (i, line) in text.lines().enumerate().skip(PREAMBLE_LINES) {
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Ok(obs) => observations.push(obs),
            Err(kind) => {
                let err = ParseError::Row { line: i + 1, kind };
                match policy {
                    RowPolicy::Abort => return Err(err),
                    RowPolicy::Skip => {
                        debug!("Skipping row: {err}");
                        rejected.push(err);
                    }
                }
            }
        }
    }

    debug!(
        accepted = observations.len(),
        rejected = rejected.len(),
        "Parsed archive payload"
    );

    Ok(ParsedFeed {
        observations: ObservationSet::new(observations),
        rejected,
    })
}

fn parse_row(line: &str) -> Result<DailyObservation, RowErrorKind> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(RowErrorKind::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let date = date::parse_canonical(fields[0]).map_err(|_| RowErrorKind::Date(fields[0].to_string()))?;

    Ok(DailyObservation {
        date,
        temperature_min: number("temperature_min", fields[1])?,
        temperature_max: number("temperature_max", fields[2])?,
        precipitation: number("precipitation", fields[3])?,
        humidity: number("humidity", fields[4])?,
    })
}

fn number(field: &'static str, raw: &str) -> Result<f64, RowErrorKind> {
    raw.parse::<f64>().map_err(|_| RowErrorKind::Number {
        field,
        raw: raw.to_string(),
    })
}
