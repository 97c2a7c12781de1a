//! Seed dataset generator
//!
//! Fetches a batch of synthetic person records, deduplicates cities and
//! countries into surrogate-keyed lookup tables, and writes the whole
//! dataset as a SQL script. Script-style: errors terminate the process
//! with context, success prints a single confirmation line.

use anyhow::Context;
use clap::Parser;
use resource_latency_probe::{
    config::EnvManager,
    defaults,
    logging::{level_for_flags, StructuredLogger},
    seed::{SeedConfig, SeedGenerator},
};
use std::path::PathBuf;

/// Seed dataset generator - synthesizes users/cities/countries SQL
#[derive(Parser, Debug)]
#[command(name = "seedgen")]
#[command(version, about, long_about = None)]
struct SeedCli {
    /// Number of person records to request
    #[arg(short, long, default_value_t = defaults::DEFAULT_SEED_COUNT)]
    count: u32,

    /// Nationality filter (comma-separated country codes)
    #[arg(long, default_value = "gb,fr,nl")]
    nat: String,

    /// Batch source endpoint
    #[arg(long = "source-url", env = "SEED_SOURCE_URL")]
    source_url: Option<String>,

    /// Output path for the generated SQL script
    #[arg(short, long, env = "SEED_OUTPUT_PATH")]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = defaults::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = SeedCli::parse();

    EnvManager::load_env_file(cli.debug).context("Failed to load environment")?;

    let mut config = SeedConfig {
        record_count: cli.count,
        nationalities: cli
            .nat
            .split(',')
            .map(|nat| nat.trim().to_string())
            .filter(|nat| !nat.is_empty())
            .collect(),
        timeout_seconds: cli.timeout,
        ..SeedConfig::default()
    };
    config.merge_from_env().context("Failed to read environment")?;

    // CLI flags win over environment values
    if let Some(source_url) = cli.source_url {
        config.source_url = source_url;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let logger = StructuredLogger::new(level_for_flags(cli.verbose, cli.debug), true);
    logger.debug("seedgen", format!("Run correlation id: {}", logger.run_id()));

    let generator = SeedGenerator::new(config).context("Invalid generator configuration")?;
    generator
        .run(&logger)
        .await
        .context("Seed generation failed")?;

    println!("SQL file created");

    Ok(())
}
