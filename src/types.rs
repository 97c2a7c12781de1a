//! Type definitions for probe outcomes and timing measurements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Classification of a single fetch attempt.
///
/// Every attempt maps to exactly one variant: the HTTP status decides
/// between the first four, and any transport-level failure (connection
/// refused, DNS, timeout, unreadable or undecodable body) becomes
/// `TransportFailure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// HTTP 200 with a decoded JSON payload
    Success(serde_json::Value),
    /// HTTP 404
    NotFound,
    /// HTTP 5xx
    ServerError(u16),
    /// Any other status (3xx, 4xx other than 404, non-200 2xx)
    UnexpectedStatus(u16),
    /// Transport-level failure; aborts the current resource's block
    TransportFailure(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    /// Short machine-readable label for structured logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound => "not_found",
            Self::ServerError(_) => "server_error",
            Self::UnexpectedStatus(_) => "unexpected_status",
            Self::TransportFailure(_) => "transport_failure",
        }
    }

    /// HTTP status observed for this outcome, if the response arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success(_) => Some(200),
            Self::NotFound => Some(404),
            Self::ServerError(status) | Self::UnexpectedStatus(status) => Some(*status),
            Self::TransportFailure(_) => None,
        }
    }
}

/// Ordinal of an attempt within a resource's two-fetch block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attempt {
    First,
    Second,
}

impl Attempt {
    /// Display name used in the per-attempt timing line
    pub fn as_str(&self) -> &'static str {
        match self {
            Attempt::First => "First",
            Attempt::Second => "Second",
        }
    }
}

/// Timing record for a single fetch attempt.
///
/// Ephemeral: produced, reported, and discarded. Nothing persists or
/// aggregates these across the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchMeasurement {
    /// Resource id this attempt targeted
    pub resource_id: u32,

    /// First or second attempt within the block
    pub attempt: Attempt,

    /// Classification of the response
    pub outcome: ProbeOutcome,

    /// Wall-clock duration of the fetch
    pub elapsed: Duration,

    /// When the attempt was issued
    pub timestamp: DateTime<Utc>,
}

impl FetchMeasurement {
    pub fn new(resource_id: u32, attempt: Attempt, outcome: ProbeOutcome, elapsed: Duration) -> Self {
        Self {
            resource_id,
            attempt,
            outcome,
            elapsed,
            timestamp: Utc::now(),
        }
    }

    /// Elapsed time in seconds, as reported in the timing line
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn is_successful(&self) -> bool {
        self.outcome.is_success()
    }
}
