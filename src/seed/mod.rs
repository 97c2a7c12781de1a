//! Seed dataset synthesis: fetch, deduplicate, emit SQL
//!
//! One-shot batch transform, independent of the probe at runtime. Its
//! output happens to seed the data the probe later reads; that ordering
//! is operational, not enforced here.

pub mod dedup;
pub mod source;
pub mod sql;

pub use dedup::DedupIndex;
pub use source::{RandomPersonClient, SynthesizedRecord};
pub use sql::{write_script, SqlSummary};

use crate::{
    defaults,
    error::{AppError, Result},
    logging::StructuredLogger,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one generator run
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Batch source endpoint
    pub source_url: String,
    /// Number of person records to request
    pub record_count: u32,
    /// Nationality filter passed to the source
    pub nationalities: Vec<String>,
    /// Where the SQL script is written
    pub output_path: PathBuf,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source_url: defaults::DEFAULT_SEED_SOURCE_URL.to_string(),
            record_count: defaults::DEFAULT_SEED_COUNT,
            nationalities: defaults::DEFAULT_SEED_NATIONALITIES
                .iter()
                .map(|nat| nat.to_string())
                .collect(),
            output_path: PathBuf::from(defaults::DEFAULT_SEED_OUTPUT_PATH),
            timeout_seconds: defaults::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl SeedConfig {
    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(source_url) = std::env::var("SEED_SOURCE_URL") {
            if !source_url.is_empty() {
                self.source_url = source_url;
            }
        }

        if let Ok(output_path) = std::env::var("SEED_OUTPUT_PATH") {
            if !output_path.is_empty() {
                self.output_path = PathBuf::from(output_path);
            }
        }

        Ok(())
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.source_url).map_err(|e| {
            AppError::config(format!("Invalid source URL '{}': {}", self.source_url, e))
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::config(format!(
                    "Source URL must use http or https, got '{}'",
                    other
                )))
            }
        }

        if self.record_count == 0 {
            return Err(AppError::config("Record count must be greater than 0"));
        }

        if self.record_count > 5000 {
            return Err(AppError::config("Record count cannot exceed 5000"));
        }

        if self.nationalities.is_empty() {
            return Err(AppError::config("At least one nationality is required"));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Orchestrates one generator run: fetch, transform, write
pub struct SeedGenerator {
    config: SeedConfig,
}

impl SeedGenerator {
    pub fn new(config: SeedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Fetch the batch and write the seed script to the configured path
    pub async fn run(&self, logger: &StructuredLogger) -> Result<SqlSummary> {
        logger.info(
            "seedgen",
            format!(
                "Fetching {} records (nat: {}) from {}",
                self.config.record_count,
                self.config.nationalities.join(","),
                self.config.source_url
            ),
        );

        let client = RandomPersonClient::new(self.config.source_url.clone(), self.config.timeout())?;
        let records = client
            .fetch_batch(self.config.record_count, &self.config.nationalities)
            .await?;

        logger.info("seedgen", format!("Fetched {} records", records.len()));

        if let Some(parent) = self.config.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::io(format!(
                        "Failed to create output directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut file = fs::File::create(&self.config.output_path).map_err(|e| {
            AppError::io(format!(
                "Failed to create {}: {}",
                self.config.output_path.display(),
                e
            ))
        })?;

        let summary = write_script(&records, &mut file)?;

        logger.info(
            "seedgen",
            format!(
                "Wrote {} ({} cities, {} countries, {} users)",
                self.config.output_path.display(),
                summary.cities,
                summary.countries,
                summary.users
            ),
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.record_count, 1000);
        assert_eq!(config.nationalities, vec!["gb", "fr", "nl"]);
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let config = SeedConfig {
            record_count: 0,
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_count() {
        let config = SeedConfig {
            record_count: 5001,
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_nationalities() {
        let config = SeedConfig {
            nationalities: Vec::new(),
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_source_url() {
        let config = SeedConfig {
            source_url: "file:///etc/passwd".to_string(),
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generator_rejects_invalid_config() {
        let config = SeedConfig {
            record_count: 0,
            ..SeedConfig::default()
        };
        assert!(SeedGenerator::new(config).is_err());
    }
}
