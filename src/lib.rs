// src/lib.rs
//! Scrape LinkedIn job postings and export them as YAML files.

pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod linkedin;
pub mod logging;
pub mod messaging;
pub mod web;

pub use browser::{DispatchOutcome, Extension, TriggerSignal, EXTRACT_COMMAND};
pub use config::ExporterConfig;
pub use export::{ExportDocument, YamlExporter};
pub use linkedin::{JobRecord, JobScraper, Page};
pub use web::start_web_server;
