//! Report formatting and display for per-resource probe blocks
//!
//! The probe's stdout report is the product of the run. Formatters only
//! decorate the text; the line content itself is identical between the
//! plain and colored variants.

use crate::{
    error::Result,
    types::{Attempt, ProbeOutcome},
};
use colored::Colorize;
use std::io::Write;

/// Width of the block separator line
const SEPARATOR_WIDTH: usize = 40;

/// Formatting of the individual report lines
pub trait ReportFormatter: Send + Sync {
    /// Separator opening each resource's block
    fn separator(&self) -> String;

    /// Human-readable line for a classified outcome.
    ///
    /// Success produces no line; the timing lines are the only trace of a
    /// successful attempt.
    fn outcome_line(&self, outcome: &ProbeOutcome) -> Option<String>;

    /// The probed URL, echoed into the block
    fn url_line(&self, url: &str) -> String;

    /// Per-attempt timing line, seconds with 5 fractional digits
    fn timing_line(&self, attempt: Attempt, elapsed_seconds: f64) -> String;

    /// Diagnostic line for a transport-level failure
    fn transport_failure_line(&self, message: &str) -> String;
}

/// Plain text formatter preserving the report byte-for-byte
pub struct PlainFormatter;

impl ReportFormatter for PlainFormatter {
    fn separator(&self) -> String {
        "-".repeat(SEPARATOR_WIDTH)
    }

    fn outcome_line(&self, outcome: &ProbeOutcome) -> Option<String> {
        outcome_text(outcome)
    }

    fn url_line(&self, url: &str) -> String {
        url.to_string()
    }

    fn timing_line(&self, attempt: Attempt, elapsed_seconds: f64) -> String {
        format!("{} request took {:.5} seconds", attempt.as_str(), elapsed_seconds)
    }

    fn transport_failure_line(&self, message: &str) -> String {
        format!("Request failed: {}", message)
    }
}

/// Colored formatter; same text, terminal colors layered on top
pub struct ColoredFormatter;

impl ReportFormatter for ColoredFormatter {
    fn separator(&self) -> String {
        "-".repeat(SEPARATOR_WIDTH).dimmed().to_string()
    }

    fn outcome_line(&self, outcome: &ProbeOutcome) -> Option<String> {
        let text = outcome_text(outcome)?;
        let colored = match outcome {
            ProbeOutcome::NotFound => text.yellow().to_string(),
            ProbeOutcome::ServerError(_) => text.red().to_string(),
            ProbeOutcome::UnexpectedStatus(_) => text.yellow().to_string(),
            _ => text,
        };
        Some(colored)
    }

    fn url_line(&self, url: &str) -> String {
        url.cyan().to_string()
    }

    fn timing_line(&self, attempt: Attempt, elapsed_seconds: f64) -> String {
        format!(
            "{} request took {} seconds",
            attempt.as_str(),
            format!("{:.5}", elapsed_seconds).bold()
        )
    }

    fn transport_failure_line(&self, message: &str) -> String {
        format!("Request failed: {}", message).red().to_string()
    }
}

/// Canonical outcome line text shared by both formatters
fn outcome_text(outcome: &ProbeOutcome) -> Option<String> {
    match outcome {
        ProbeOutcome::Success(_) => None,
        ProbeOutcome::NotFound => Some("Resource not found".to_string()),
        ProbeOutcome::ServerError(_) => Some("Server error – retry later".to_string()),
        ProbeOutcome::UnexpectedStatus(status) => Some(format!("Unexpected status: {}", status)),
        // Transport failures use the dedicated failure line instead
        ProbeOutcome::TransportFailure(_) => None,
    }
}

/// Create a formatter based on color preference
pub fn formatter_for(enable_color: bool) -> Box<dyn ReportFormatter> {
    if enable_color {
        Box::new(ColoredFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

/// Writes per-resource report blocks to a sink.
///
/// The runner drives this line by line so output streams as the probe
/// progresses rather than accumulating.
pub struct ProbeReporter<W: Write> {
    formatter: Box<dyn ReportFormatter>,
    writer: W,
}

impl<W: Write> ProbeReporter<W> {
    pub fn new(formatter: Box<dyn ReportFormatter>, writer: W) -> Self {
        Self { formatter, writer }
    }

    /// Open a new resource block with the separator line
    pub fn begin_block(&mut self) -> Result<()> {
        writeln!(self.writer, "{}", self.formatter.separator())?;
        Ok(())
    }

    /// Report a classified (non-transport-failure) attempt.
    ///
    /// The first attempt echoes the URL between its outcome line and its
    /// timing line; the second attempt emits outcome and timing only.
    pub fn report_attempt(
        &mut self,
        url: &str,
        attempt: Attempt,
        outcome: &ProbeOutcome,
        elapsed_seconds: f64,
    ) -> Result<()> {
        if let Some(line) = self.formatter.outcome_line(outcome) {
            writeln!(self.writer, "{}", line)?;
        }
        if attempt == Attempt::First {
            writeln!(self.writer, "{}", self.formatter.url_line(url))?;
        }
        writeln!(
            self.writer,
            "{}",
            self.formatter.timing_line(attempt, elapsed_seconds)
        )?;
        Ok(())
    }

    /// Report a transport failure; the block ends after these two lines
    pub fn report_transport_failure(&mut self, url: &str, message: &str) -> Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.transport_failure_line(message)
        )?;
        writeln!(self.writer, "{}", self.formatter.url_line(url))?;
        Ok(())
    }

    /// Flush and hand back the underlying sink
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
