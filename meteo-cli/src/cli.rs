use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomUserError, Text, validator::Validation};
use meteo_core::{
    ArchiveClient, ArchiveRequest, Config, DataStore, ParsedFeed, RowPolicy, build_report, date,
    retrieve, store,
};
use tracing::debug;

use crate::menu;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Explore archived daily weather for Montpellier")]
pub struct Cli {
    /// First day to download (DD-MM-YYYY). Asked for interactively when omitted.
    #[arg(long, global = true)]
    pub start: Option<String>,

    /// File holding the downloaded payload (overrides the config).
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Abort the load on the first malformed row instead of skipping it.
    #[arg(long, global = true)]
    pub strict: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download the archive and open the interactive menu (default).
    Menu,

    /// Download the archive and print the full report.
    Report {
        /// Also write the report to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show where the configuration lives.
    Config {
        /// Write a config file with the default values if none exists.
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        setup_logging(self.verbose);

        let mut config = Config::load()?;
        if let Some(path) = &self.data_file {
            config.data_file = path.clone();
        }
        if self.strict {
            config.row_policy = RowPolicy::Abort;
        }

        match &self.command {
            Some(Command::Config { init }) => show_config(&config, *init),
            Some(Command::Report { output }) => {
                let start = self.start_date(false, &config)?;
                let feed = load(&config, start).await?;
                let report = build_report(&feed.observations)?;
                println!("{report}");

                if let Some(path) = output {
                    store::write_report(path, &report)?;
                    println!("Report saved to '{}'", path.display());
                }
                Ok(())
            }
            Some(Command::Menu) | None => {
                let start = self.start_date(true, &config)?;
                let feed = load(&config, start).await?;
                menu::run(&feed.observations, &config)
            }
        }
    }

    /// `--start` if given, otherwise a prompt (interactive) or the default.
    fn start_date(&self, interactive: bool, config: &Config) -> anyhow::Result<Option<NaiveDate>> {
        if let Some(raw) = &self.start {
            return Ok(Some(date::parse_user_date(raw)?));
        }
        if !interactive {
            return Ok(None);
        }

        let default = config.default_start.format("%d-%m-%Y").to_string();
        let help = format!("Leave empty to start on {default}");
        let answer = Text::new("Start date (DD-MM-YYYY):")
            .with_placeholder(&default)
            .with_help_message(&help)
            .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
                if input.trim().is_empty() || date::parse_user_date(input).is_ok() {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid("Expected a date such as 01-01-2025".into()))
                }
            })
            .prompt()?;

        parse_optional_date(&answer)
    }
}

fn parse_optional_date(answer: &str) -> anyhow::Result<Option<NaiveDate>> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    Ok(Some(date::parse_user_date(answer)?))
}

async fn load(config: &Config, start: Option<NaiveDate>) -> anyhow::Result<ParsedFeed> {
    let today = Local::now().date_naive();
    let request = ArchiveRequest::new(start, config.default_start, today);
    let client = ArchiveClient::new(config);
    let store = DataStore::new(&config.data_file);

    let feed = retrieve(&client, &store, &request, config.row_policy)
        .await
        .context("Could not load weather data")?;

    println!(
        "Loaded {} days ({} to {}) into '{}'",
        feed.observations.len(),
        date::display(request.start),
        date::display(request.end),
        store.path().display()
    );
    if !feed.rejected.is_empty() {
        println!("{} malformed rows were left out:", feed.rejected.len());
        for err in &feed.rejected {
            println!("  - {err}");
        }
    }

    Ok(feed)
}

fn show_config(config: &Config, init: bool) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;

    if init && !path.exists() {
        config.save()?;
        println!("Wrote default configuration to {}", path.display());
    } else {
        println!("Configuration file: {}", path.display());
    }
    println!("Data file: {}", config.data_file.display());
    println!("Report file: {}", config.report_file.display());
    Ok(())
}

/// Set up structured logging on stderr.
fn setup_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meteo={level},meteo_core={level}")));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", level);
}
