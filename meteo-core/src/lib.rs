//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The archive client and the CSV payload parser
//! - Daily observation models and the statistics computed over them
//! - The plain-text report and the local file store
//!
//! It is used by `meteo-cli`, but holds no terminal interaction of its own.

pub mod archive;
pub mod config;
pub mod date;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod retrieve;
pub mod stats;
pub mod store;

pub use archive::{ArchiveClient, ArchiveRequest, ArchiveSource};
pub use config::Config;
pub use error::{DateFormatError, FetchError, ParseError, ReportError, RetrieveError, StoreError};
pub use model::{AggregateReport, DailyObservation, DayExtreme, ObservationSet, RainCheck};
pub use parser::{ParsedFeed, RowPolicy};
pub use report::build_report;
pub use retrieve::retrieve;
pub use store::DataStore;
