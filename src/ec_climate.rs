//! The main entry point for querying Environment and Climate Change Canada
//! historical climate data: locate stations near a point, classify their
//! coverage, and fetch their records.

use crate::coverage::{self, CoverageReport};
use crate::error::EcClimateError;
use crate::inventory::store::InventoryStore;
use crate::proximity::{self, DEFAULT_RADIUS_KM};
use crate::records::fetcher::RecordFetcher;
use crate::records::normalize::NormalizedSeries;
use crate::types::granularity::Granularity;
use crate::types::station::Station;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use log::info;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// The ECCC historical-climate client.
///
/// Construction loads the station inventory (from the cached copy, or by
/// downloading it once) into an in-memory store. The store is immutable for
/// the life of the client and every other operation reads from it; there is
/// no ambient global state. All operations are synchronous and sequential.
///
/// # Examples
///
/// ```no_run
/// use ec_climate::{EcClimate, EcClimateError};
///
/// fn main() -> Result<(), EcClimateError> {
///     let client = EcClimate::new()?;
///     let nearby = client
///         .stations_near()
///         .latitude(45.0)
///         .longitude(-79.0)
///         .call()?;
///     println!("{} stations within 25 km", nearby.len());
///     Ok(())
/// }
/// ```
pub struct EcClimate {
    store: InventoryStore,
    fetcher: RecordFetcher,
}

#[bon]
impl EcClimate {
    /// Creates a client with a specific cache folder.
    ///
    /// The folder is created if needed and holds the cached station
    /// inventory. Fails with a retrieval error if the inventory must be
    /// downloaded and the source is unreachable or returns a non-success
    /// status, and with a parse error if the inventory has no station table.
    pub fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, EcClimateError> {
        ensure_cache_dir_exists(&cache_folder)
            .map_err(|e| EcClimateError::CacheDirCreation(cache_folder.clone(), e))?;
        let client = reqwest::blocking::Client::new();
        let store = InventoryStore::load(&cache_folder, &client)?;
        Ok(EcClimate {
            store,
            fetcher: RecordFetcher::new(client),
        })
    }

    /// Creates a client using the system cache directory (via the `dirs`
    /// crate), e.g. `~/.cache/ec_climate_cache` on Linux.
    pub fn new() -> Result<Self, EcClimateError> {
        let cache_folder = get_cache_dir().map_err(EcClimateError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder)
    }

    /// The loaded station inventory.
    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Returns the names of stations within `radius_km` (default 25 km,
    /// boundary inclusive) of the query point, as an unordered set.
    ///
    /// # Arguments
    ///
    /// * `.latitude(f64)` / `.longitude(f64)`: **Required.** Query point in decimal degrees.
    /// * `.radius_km(f64)`: Optional. Search radius in kilometers, default `25.0`.
    #[builder]
    pub fn stations_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<HashSet<String>, EcClimateError> {
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        proximity::stations_near(&self.store, latitude, longitude, radius_km)
            .map_err(EcClimateError::from)
    }

    /// True iff the station's monthly coverage spans its whole active period.
    pub fn full_monthly(&self, station: &str) -> Result<bool, EcClimateError> {
        Ok(coverage::full_monthly(self.lookup(station)?))
    }

    /// True iff the station's daily coverage spans its whole active period.
    pub fn full_daily(&self, station: &str) -> Result<bool, EcClimateError> {
        Ok(coverage::full_daily(self.lookup(station)?))
    }

    /// Reports the station's coverage ranges and which gap-filling lookups
    /// they call for. Performs no fetch.
    pub fn station_dates(&self, station: &str) -> Result<CoverageReport, EcClimateError> {
        Ok(coverage::station_dates(self.lookup(station)?))
    }

    /// Fetches and normalizes one response worth of records for a station.
    ///
    /// Returns `Ok(None)` when retrieval fails for this station (logged,
    /// non-fatal), so surrounding iteration can continue.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** Station name as listed in the inventory.
    /// * `.year(i32)` / `.month(u32)`: **Required.** Period anchor.
    /// * `.granularity(Granularity)`: **Required.** Timeframe of the records.
    #[builder]
    pub fn fetch(
        &self,
        station: &str,
        year: i32,
        month: u32,
        granularity: Granularity,
    ) -> Result<Option<NormalizedSeries>, EcClimateError> {
        let station = self.lookup(station)?;
        self.fetcher
            .fetch(station, year, month, granularity)
            .map_err(EcClimateError::from)
    }

    /// Fetches monthly records for every station near a point whose monthly
    /// coverage spans its whole active period.
    ///
    /// Stations whose retrieval degrades to no-data are skipped; structural
    /// errors abort the call.
    ///
    /// # Arguments
    ///
    /// * `.latitude(f64)` / `.longitude(f64)`: **Required.** Query point in decimal degrees.
    /// * `.year(i32)` / `.month(u32)`: **Required.** Period anchor.
    /// * `.radius_km(f64)`: Optional. Search radius in kilometers, default `25.0`.
    #[builder]
    pub fn monthly_records_near(
        &self,
        latitude: f64,
        longitude: f64,
        year: i32,
        month: u32,
        radius_km: Option<f64>,
    ) -> Result<HashMap<String, NormalizedSeries>, EcClimateError> {
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        let nearby = proximity::stations_near(&self.store, latitude, longitude, radius_km)?;
        info!("Found {} stations within {} km", nearby.len(), radius_km);

        let mut records = HashMap::new();
        for name in nearby {
            let station = self.lookup(&name)?;
            if !coverage::full_monthly(station) {
                continue;
            }
            if let Some(series) = self
                .fetcher
                .fetch(station, year, month, Granularity::Monthly)?
            {
                records.insert(name, series);
            }
        }
        Ok(records)
    }

    fn lookup(&self, name: &str) -> Result<&Station, EcClimateError> {
        self.store
            .get(name)
            .ok_or_else(|| EcClimateError::UnknownStation(name.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn with_parts(store: InventoryStore, fetcher: RecordFetcher) -> Self {
        EcClimate { store, fetcher }
    }
}
