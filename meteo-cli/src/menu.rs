//! Interactive menu over a loaded dataset.

use std::fmt;

use anyhow::Result;
use inquire::{CustomType, InquireError, Select, Text};
use meteo_core::{
    Config, DailyObservation, ObservationSet, RainCheck, build_report, date, stats, store,
};
use tracing::debug;

use crate::charts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Sample,
    AverageTemperature,
    RainCheck,
    MinTemperature,
    MaxTemperature,
    RainDays,
    Report,
    TemperatureChart,
    PrecipitationChart,
    SaveReport,
    Exit,
}

impl Action {
    const ALL: [Action; 11] = [
        Action::Sample,
        Action::AverageTemperature,
        Action::RainCheck,
        Action::MinTemperature,
        Action::MaxTemperature,
        Action::RainDays,
        Action::Report,
        Action::TemperatureChart,
        Action::PrecipitationChart,
        Action::SaveReport,
        Action::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::Sample => "1. Show a sample of the data",
            Action::AverageTemperature => "2. Average temperature",
            Action::RainCheck => "3. Did it rain on a given date?",
            Action::MinTemperature => "4. Minimum temperature",
            Action::MaxTemperature => "5. Maximum temperature",
            Action::RainDays => "6. Number of rain days",
            Action::Report => "7. Full report",
            Action::TemperatureChart => "8. Temperature chart",
            Action::PrecipitationChart => "9. Precipitation chart",
            Action::SaveReport => "10. Save the full report to a file",
            Action::Exit => "0. Quit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Run the menu loop until the user quits.
///
/// Failing actions are reported and the loop goes on.
pub fn run(set: &ObservationSet, config: &Config) -> Result<()> {
    loop {
        println!("--------------------------------------------------");
        let choice = Select::new("Weather analysis menu:", Action::ALL.to_vec())
            .with_page_size(Action::ALL.len())
            .prompt();

        let action = match choice {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Action::Exit
            }
            Err(e) => return Err(e.into()),
        };

        if action == Action::Exit {
            println!("Goodbye!");
            return Ok(());
        }

        if let Err(e) = perform(action, set, config) {
            debug!("{action} failed: {e:?}");
            eprintln!("Error: {e:#}");
        }
    }
}

fn perform(action: Action, set: &ObservationSet, config: &Config) -> Result<()> {
    match action {
        Action::Sample => {
            let n = CustomType::<usize>::new("How many entries?")
                .with_default(config.sample_size)
                .with_error_message("Please type a whole number")
                .prompt()?;

            let sample = set.sample(n);
            println!("First {} entries:", sample.len());
            for (i, obs) in sample.iter().enumerate() {
                println!("{}", sample_line(i + 1, obs));
            }
        }
        Action::AverageTemperature => {
            println!("Average temperature: {:.2}°C", stats::average_temperature(set));
        }
        Action::RainCheck => {
            let raw = Text::new("Date (DD-MM-YYYY):").prompt()?;
            let day = date::parse_user_date(&raw)?;
            println!("{}", rain_message(stats::had_rain_on(set, day), raw.trim()));
        }
        Action::MinTemperature => {
            println!("Minimum temperature: {}", temperature(stats::min_temperature(set)));
        }
        Action::MaxTemperature => {
            println!("Maximum temperature: {}", temperature(stats::max_temperature(set)));
        }
        Action::RainDays => {
            println!("Number of rain days: {}", stats::rain_day_count(set));
        }
        Action::Report => {
            println!("{}", build_report(set)?);
        }
        Action::TemperatureChart => {
            let path = config.chart_dir.join(charts::TEMPERATURE_FILE);
            charts::temperature_chart(set, &path)?;
            println!("Temperature chart written to '{}'", path.display());
        }
        Action::PrecipitationChart => {
            let path = config.chart_dir.join(charts::PRECIPITATION_FILE);
            charts::precipitation_chart(set, &path)?;
            println!("Precipitation chart written to '{}'", path.display());
        }
        Action::SaveReport => {
            let report = build_report(set)?;
            store::write_report(&config.report_file, &report)?;
            println!("Report saved to '{}'", config.report_file.display());
        }
        Action::Exit => {}
    }

    Ok(())
}

fn sample_line(number: usize, obs: &DailyObservation) -> String {
    format!(
        "#{number}: Date: {}, Min temperature: {}°C, Max temperature: {}°C, Precipitation: {} mm, Humidity: {} %",
        date::display(obs.date),
        obs.temperature_min,
        obs.temperature_max,
        obs.precipitation,
        obs.humidity
    )
}

fn rain_message(check: RainCheck, typed: &str) -> String {
    match check {
        RainCheck::Rained => format!("It rained on {typed}."),
        RainCheck::Dry => format!("It did not rain on {typed}."),
        RainCheck::NotFound => "Date not found in the data.".to_string(),
    }
}

fn temperature(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{t:.1}°C"),
        None => "no data".to_string(),
    }
}
