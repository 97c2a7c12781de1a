//! Random-person source client and record types

use crate::error::{AppError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response envelope of the random-person API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub results: Vec<PersonRecord>,
}

/// One person record as returned by the source, limited to the fields
/// requested via the `inc` parameter
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub name: PersonName,
    pub email: String,
    pub cell: String,
    pub location: PersonLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonLocation {
    pub city: String,
    pub country: String,
}

/// Flattened record the SQL emitter consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
}

impl From<PersonRecord> for SynthesizedRecord {
    fn from(record: PersonRecord) -> Self {
        Self {
            full_name: format!("{} {}", record.name.first, record.name.last),
            email: record.email,
            phone: record.cell,
            city: record.location.city,
            country: record.location.country,
        }
    }
}

/// Client for the random-person batch source
pub struct RandomPersonClient {
    client: Client,
    source_url: String,
}

impl RandomPersonClient {
    pub fn new<S: Into<String>>(source_url: S, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("resource-latency-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            source_url: source_url.into(),
        })
    }

    /// Fetch one batch of records, preserving the source's arrival order
    pub async fn fetch_batch(
        &self,
        count: u32,
        nationalities: &[String],
    ) -> Result<Vec<SynthesizedRecord>> {
        let response = self
            .client
            .get(&self.source_url)
            .query(&[
                ("results", count.to_string()),
                ("nat", nationalities.join(",")),
                ("inc", crate::defaults::SEED_INCLUDED_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::http_request(format!("Batch fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http_request(format!(
                "Batch source returned status {}",
                status.as_u16()
            )));
        }

        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::parse(format!("Failed to decode batch response: {}", e)))?;

        Ok(envelope
            .results
            .into_iter()
            .map(SynthesizedRecord::from)
            .collect())
    }
}
