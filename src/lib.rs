//! Resource Latency Probe
//!
//! Probes a users REST endpoint for per-resource cold/warm latency by
//! issuing two sequential GET requests per resource id and classifying
//! every response. A companion generator synthesizes a referentially
//! consistent seed dataset (users, cities, countries) as SQL statements.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod probe;
pub mod seed;
pub mod types;

// Re-export commonly used types
pub use client::{ProbeClient, ResourceProber};
pub use config::{load_config, Config};
pub use error::{AppError, Result};
pub use output::{ColoredFormatter, PlainFormatter, ProbeReporter, ReportFormatter};
pub use probe::ProbeRunner;
pub use types::{Attempt, FetchMeasurement, ProbeOutcome};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    /// Base URL of the probed users endpoint.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

    /// Fixed, sequential resource-id space: ids 1..=RESOURCE_COUNT.
    pub const RESOURCE_COUNT: u32 = 1000;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Seed-dataset generator defaults.
    pub const DEFAULT_SEED_SOURCE_URL: &str = "https://randomuser.me/api/";
    pub const DEFAULT_SEED_COUNT: u32 = 1000;
    pub const DEFAULT_SEED_NATIONALITIES: &[&str] = &["gb", "fr", "nl"];
    pub const DEFAULT_SEED_OUTPUT_PATH: &str = "./initdb/init.sql";
    /// Fields requested from the random-person source.
    pub const SEED_INCLUDED_FIELDS: &str = "email,name,cell,location";
}
