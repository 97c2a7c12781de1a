//! Resource Latency Probe - Main CLI Application
//!
//! Issues two sequential GET requests per resource id against the
//! configured users endpoint and reports per-attempt classification and
//! timing on stdout.

use clap::Parser;
use resource_latency_probe::{
    cli::Cli,
    client::ProbeClient,
    config::{display_config_summary, load_config},
    error::Result,
    logging::{level_for_flags, StructuredLogger},
    output::{formatter_for, ProbeReporter},
    probe::ProbeRunner,
    AppError, PKG_NAME, VERSION,
};
use std::error::Error;
use std::io;
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    // Show debug info if requested
    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    // Load and validate configuration
    let config = load_config(cli)?;

    let logger = StructuredLogger::new(
        level_for_flags(config.verbose, config.debug),
        config.enable_color,
    );

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    logger.debug("probe", format!("Run correlation id: {}", logger.run_id()));
    logger.info(
        "probe",
        format!(
            "Probing {}/users/{{1..{}}} with {}s timeout",
            config.base_url,
            resource_latency_probe::defaults::RESOURCE_COUNT,
            config.timeout_seconds
        ),
    );

    // Initialize core components
    let client = ProbeClient::with_timeout(config.timeout())?;
    let formatter = formatter_for(config.enable_color);
    let mut reporter = ProbeReporter::new(formatter, io::stdout());
    let runner = ProbeRunner::new(config.base_url.clone());

    // Execute the probe; the report is the product, the measurements are
    // not consumed further
    let measurements = runner.run(&client, &mut reporter).await?;

    logger.info(
        "probe",
        format!("Completed {} measurements", measurements.len()),
    );

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config { .. } | AppError::Validation { .. } => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Base URL must start with http:// or https://");
            eprintln!("  - Timeout must be between 1 and 300 seconds");
        }
        AppError::Network { .. } | AppError::HttpRequest { .. } => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check that the endpoint is running and reachable");
            eprintln!("  - Verify the base URL and port");
        }
        AppError::Timeout { .. } => {
            eprintln!();
            eprintln!("Timeout troubleshooting:");
            eprintln!("  - Increase the timeout with --timeout");
            eprintln!("  - Check endpoint responsiveness");
        }
        _ => {}
    }
}
