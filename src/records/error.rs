use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to request climate records from {0}")]
    Download(String, #[source] reqwest::Error),

    #[error("Bulk data request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Response has no 'Date/Time' header line")]
    MissingDateTimeHeader,

    #[error("Failed to parse a record row")]
    Csv(#[from] csv::Error),

    #[error("Malformed '{column}' value '{value}' at {timestamp}")]
    MalformedValue {
        column: &'static str,
        value: String,
        timestamp: String,
    },
}
