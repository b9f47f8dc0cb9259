mod coverage;
mod ec_climate;
mod error;
mod inventory;
mod proximity;
mod records;
#[cfg(test)]
mod testutil;
mod types;
mod utils;

pub use ec_climate::*;
pub use error::EcClimateError;

pub use coverage::{full_daily, full_monthly, station_dates, CoverageReport, GapPlan};
pub use inventory::error::InventoryError;
pub use inventory::store::InventoryStore;
pub use proximity::{distance_km, stations_near, ProximityError, DEFAULT_RADIUS_KM};
pub use records::error::RecordError;
pub use records::fetcher::RecordFetcher;
pub use records::normalize::{normalize_response, NormalizedSeries};
pub use records::request::{bulk_data_url, BULK_DATA_ENDPOINT};
pub use types::granularity::Granularity;
pub use types::station::{Station, YearRange};
