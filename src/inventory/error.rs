use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to download station inventory from {0}")]
    Download(String, #[source] reqwest::Error),

    #[error("Inventory download from {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read cached inventory '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cached inventory '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Inventory file ended before the station table header")]
    MissingHeader,

    #[error("Failed to parse an inventory row")]
    Csv(#[from] csv::Error),
}
