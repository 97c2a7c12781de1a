//! Probe execution: the sequential two-attempt loop over the id space

use crate::{
    client::ResourceProber,
    error::Result,
    output::ProbeReporter,
    types::{Attempt, FetchMeasurement, ProbeOutcome},
};
use std::io::Write;

/// Drives the probe over the fixed resource-id space.
///
/// Ids are visited in ascending order; within an id the first attempt
/// strictly precedes the second, and the second is issued only when the
/// first did not end in a transport failure. Attempts are never issued
/// concurrently, so second-attempt timing reflects post-first-attempt
/// state of the backing service.
pub struct ProbeRunner {
    base_url: String,
    resource_count: u32,
}

impl ProbeRunner {
    /// Create a runner over the default id space (1..=1000)
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            resource_count: crate::defaults::RESOURCE_COUNT,
        }
    }

    /// Override the upper id bound. Used by tests; the CLI keeps the
    /// fixed default.
    pub fn with_resource_count(mut self, resource_count: u32) -> Self {
        self.resource_count = resource_count;
        self
    }

    /// URL for one resource id
    pub fn resource_url(&self, id: u32) -> String {
        format!("{}/users/{}", self.base_url.trim_end_matches('/'), id)
    }

    /// Run the full probe, reporting each block as it completes.
    ///
    /// The returned measurements exist for observability; the probe binary
    /// discards them. Nothing aggregates across iterations.
    pub async fn run<W: Write>(
        &self,
        prober: &dyn ResourceProber,
        reporter: &mut ProbeReporter<W>,
    ) -> Result<Vec<FetchMeasurement>> {
        let mut measurements = Vec::new();

        for id in 1..=self.resource_count {
            reporter.begin_block()?;
            let url = self.resource_url(id);

            let (outcome, elapsed) = prober.probe(&url).await;
            let first = FetchMeasurement::new(id, Attempt::First, outcome, elapsed);
            if let ProbeOutcome::TransportFailure(ref message) = first.outcome {
                reporter.report_transport_failure(&url, message)?;
                measurements.push(first);
                continue;
            }
            reporter.report_attempt(&url, Attempt::First, &first.outcome, first.elapsed_seconds())?;
            measurements.push(first);

            let (outcome, elapsed) = prober.probe(&url).await;
            let second = FetchMeasurement::new(id, Attempt::Second, outcome, elapsed);
            if let ProbeOutcome::TransportFailure(ref message) = second.outcome {
                reporter.report_transport_failure(&url, message)?;
                measurements.push(second);
                continue;
            }
            reporter.report_attempt(&url, Attempt::Second, &second.outcome, second.elapsed_seconds())?;
            measurements.push(second);
        }

        Ok(measurements)
    }
}
