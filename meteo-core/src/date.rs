//! Conversions between the canonical `YYYY-MM-DD` form used as lookup key
//! and the day-first forms shown to (and typed by) users.

use chrono::NaiveDate;

use crate::error::DateFormatError;

const CANONICAL: &str = "YYYY-MM-DD";
const DAY_FIRST: &str = "DD-MM-YYYY";

/// `2025-01-31` -> `31/01/2025`.
pub fn to_display_format(date: &str) -> Result<String, DateFormatError> {
    let malformed = || DateFormatError::Malformed {
        input: date.to_string(),
        expected: CANONICAL,
    };

    let [year, month, day] = split_three(date, &['-']).ok_or_else(malformed)?;
    check_components(year, month, day).ok_or_else(malformed)?;

    Ok(format!("{day:0>2}/{month:0>2}/{year}"))
}

/// `31-01-2025` (or `31/01/2025`) -> `2025-01-31`.
pub fn to_canonical_format(date: &str) -> Result<String, DateFormatError> {
    let malformed = || DateFormatError::Malformed {
        input: date.to_string(),
        expected: DAY_FIRST,
    };

    let [day, month, year] = split_three(date, &['-', '/']).ok_or_else(malformed)?;
    check_components(year, month, day).ok_or_else(malformed)?;

    Ok(format!("{year}-{month:0>2}-{day:0>2}"))
}

/// Display form of an already-parsed date.
pub fn display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a canonical `YYYY-MM-DD` date, rejecting impossible calendar days.
pub fn parse_canonical(date: &str) -> Result<NaiveDate, DateFormatError> {
    let malformed = || DateFormatError::Malformed {
        input: date.to_string(),
        expected: CANONICAL,
    };

    let [year, month, day] = split_three(date.trim(), &['-']).ok_or_else(malformed)?;
    check_components(year, month, day).ok_or_else(malformed)?;

    let ymd = (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>());
    match ymd {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    }
    .ok_or_else(|| DateFormatError::OutOfRange(date.to_string()))
}

/// Parse a date as typed by a user (`DD-MM-YYYY`).
pub fn parse_user_date(date: &str) -> Result<NaiveDate, DateFormatError> {
    let canonical = to_canonical_format(date.trim())?;
    parse_canonical(&canonical)
}

fn split_three<'a>(date: &'a str, separators: &[char]) -> Option<[&'a str; 3]> {
    let mut parts = date.split(separators);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

fn check_components(year: &str, month: &str, day: &str) -> Option<()> {
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let short = |s: &str| digits(s) && s.len() <= 2;

    (digits(year) && year.len() == 4 && short(month) && short(day)).then_some(())
}
