use crate::inventory::error::InventoryError;
use crate::proximity::ProximityError;
use crate::records::error::RecordError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcClimateError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Proximity(#[from] ProximityError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Station '{0}' is not in the loaded inventory")]
    UnknownStation(String),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
