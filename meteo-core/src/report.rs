use std::fmt::Write;

use crate::{date, error::ReportError, model::ObservationSet, stats};

/// Render the full text report for a non-empty set.
///
/// The period covers the first and last records in feed order.
pub fn build_report(set: &ObservationSet) -> Result<String, ReportError> {
    let (Some(first), Some(last)) = (set.first(), set.last()) else {
        return Err(ReportError::EmptyDataset);
    };

    let agg = stats::aggregate(set);
    let (Some(coldest), Some(hottest)) = (agg.coldest_day, agg.hottest_day) else {
        return Err(ReportError::EmptyDataset);
    };

    let total = set.len();
    let rain_share = agg.rain_day_count as f64 / total as f64 * 100.0;

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "----- WEATHER REPORT -----");
    let _ = writeln!(
        out,
        " Start date: {} ----- End date: {}",
        date::display(first.date),
        date::display(last.date)
    );
    let _ = writeln!(out, " Average temperature: {:.2}°C", agg.average_temperature);
    let _ = writeln!(
        out,
        " Minimum temperature: {:.1}°C on {}",
        coldest.temperature,
        date::display(coldest.date)
    );
    let _ = writeln!(
        out,
        " Maximum temperature: {:.1}°C on {}",
        hottest.temperature,
        date::display(hottest.date)
    );
    let _ = writeln!(out, " Average humidity: {:.2}%", agg.average_humidity);
    let _ = writeln!(out, " Rain days: {} out of {total} days", agg.rain_day_count);
    let _ = writeln!(out, " That is {rain_share:.2}% rain days over the period");
    out.push_str("--------------------------");

    Ok(out)
}
