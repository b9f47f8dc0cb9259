//! Retrieval of climate records from the bulk-data endpoint.

use crate::records::error::RecordError;
use crate::records::normalize::{normalize_response, NormalizedSeries};
use crate::records::request::{bulk_data_query, BULK_DATA_ENDPOINT};
use crate::types::granularity::Granularity;
use crate::types::station::Station;
use log::{debug, warn};
use reqwest::blocking::Client;

/// Fetches and normalizes climate records for one station at a time.
pub struct RecordFetcher {
    client: Client,
    base_url: String,
}

impl RecordFetcher {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BULK_DATA_ENDPOINT)
    }

    /// Uses an alternate endpoint serving the same bulk-data interface.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        RecordFetcher {
            client,
            base_url: base_url.into(),
        }
    }

    /// Retrieves one response worth of records for `station` and normalizes
    /// it into timestamp-keyed series.
    ///
    /// A retrieval failure (transport error or non-success status) is logged
    /// and degrades to `Ok(None)` so that iteration over other stations can
    /// continue; callers must check for the absent result. Structural
    /// problems in a response that did arrive abort with an error.
    pub fn fetch(
        &self,
        station: &Station,
        year: i32,
        month: u32,
        granularity: Granularity,
    ) -> Result<Option<NormalizedSeries>, RecordError> {
        let url = format!(
            "{}?{}",
            self.base_url,
            bulk_data_query(&station.station_id, year, month, granularity)
        );
        debug!("Requesting {} records from {}", granularity, url);

        let body = match self.retrieve(url) {
            Ok(body) => body,
            Err(error @ (RecordError::Download(..) | RecordError::Status { .. })) => {
                warn!(
                    "No {} data for station '{}': {}",
                    granularity, station.name, error
                );
                return Ok(None);
            }
            Err(error) => return Err(error),
        };
        normalize_response(&body).map(Some)
    }

    fn retrieve(&self, url: String) -> Result<String, RecordError> {
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| RecordError::Download(url.clone(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RecordError::Status { url, status });
        }
        response.text().map_err(|e| RecordError::Download(url, e))
    }
}
