//! SVG charts of the loaded series.

use std::path::Path;

use anyhow::{Result, anyhow};
use meteo_core::{ObservationSet, date};
use plotters::prelude::*;

pub const TEMPERATURE_FILE: &str = "temperatures.svg";
pub const PRECIPITATION_FILE: &str = "precipitation.svg";

const SIZE: (u32, u32) = (1280, 640);

/// Daily minimum and maximum as two line series.
pub fn temperature_chart(set: &ObservationSet, output: &Path) -> Result<()> {
    let (low, high) = temperature_bounds(set).ok_or_else(|| anyhow!("No observations to plot"))?;
    let days = set.as_slice();

    let root = SVGBackend::new(output, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Temperatures in Montpellier", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..days.len(), padded(low, high))?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|i| day_label(set, *i))
        .x_desc("Date")
        .y_desc("Temperature (°C)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            days.iter().enumerate().map(|(i, obs)| (i, obs.temperature_min)),
            BLUE,
        ))?
        .label("Min temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(
            days.iter().enumerate().map(|(i, obs)| (i, obs.temperature_max)),
            RED,
        ))?
        .label("Max temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Daily precipitation as one bar per day.
pub fn precipitation_chart(set: &ObservationSet, output: &Path) -> Result<()> {
    if set.is_empty() {
        return Err(anyhow!("No observations to plot"));
    }
    let days = set.as_slice();
    let wettest = days.iter().map(|obs| obs.precipitation).fold(0.0_f64, f64::max);

    let root = SVGBackend::new(output, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Precipitation in Montpellier", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..days.len(), 0.0..wettest.max(1.0) * 1.1)?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|i| day_label(set, *i))
        .x_desc("Date")
        .y_desc("Precipitation (mm)")
        .draw()?;

    chart.draw_series(days.iter().enumerate().map(|(i, obs)| {
        Rectangle::new([(i, 0.0), (i + 1, obs.precipitation)], BLUE.mix(0.7).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn temperature_bounds(set: &ObservationSet) -> Option<(f64, f64)> {
    let low = set.iter().map(|obs| obs.temperature_min.min(obs.temperature_max)).reduce(f64::min)?;
    let high = set.iter().map(|obs| obs.temperature_max.max(obs.temperature_min)).reduce(f64::max)?;
    Some((low, high))
}

fn padded(low: f64, high: f64) -> std::ops::Range<f64> {
    let margin = ((high - low) * 0.05).max(1.0);
    (low - margin)..(high + margin)
}

fn day_label(set: &ObservationSet, index: usize) -> String {
    set.as_slice()
        .get(index)
        .map(|obs| date::display(obs.date))
        .unwrap_or_default()
}
