//! Loading and caching of the ECCC station inventory.
//!
//! The inventory is a single CSV published by Environment and Climate Change
//! Canada: one modification-date line, two disclaimer lines, then a
//! header-plus-rows table with one row per station. The file is cached
//! verbatim under a fixed name and parsed into an in-memory map keyed by
//! station name. The map is built once and never mutated afterwards.

use crate::inventory::error::InventoryError;
use crate::types::station::{Station, YearRange};
use csv::StringRecord;
use log::{debug, info};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// HTTPS mirror of the "Get More Data" station inventory publication.
const INVENTORY_URL: &str =
    "https://collaboration.cmc.ec.gc.ca/cmc/climate/Get_More_Data_Plus_de_donnees/Station%20Inventory%20EN.csv";
const INVENTORY_FILE_NAME: &str = "Station Inventory EN.csv";

/// The loaded station inventory, keyed by station name.
///
/// Constructed once at client startup and read-only for the life of the
/// process. Duplicate names in the source file overwrite earlier rows; the
/// inventory is treated as authoritative and is not validated beyond its
/// structure.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    stations: HashMap<String, Station>,
}

impl InventoryStore {
    /// Loads the inventory, downloading and caching it first if no cached
    /// copy exists under `cache_dir`. Idempotent: a second call with the same
    /// cache directory reads the cached file and touches no network.
    pub fn load(cache_dir: &Path, client: &Client) -> Result<Self, InventoryError> {
        Self::load_from_url(cache_dir, client, INVENTORY_URL)
    }

    /// Same as [`InventoryStore::load`] but against an explicit inventory URL,
    /// for mirrors of the publication.
    pub fn load_from_url(
        cache_dir: &Path,
        client: &Client,
        url: &str,
    ) -> Result<Self, InventoryError> {
        let cache_file = cache_dir.join(INVENTORY_FILE_NAME);

        if cache_file.exists() {
            debug!("Inventory cache hit at {}", cache_file.display());
        } else {
            info!("Inventory cache miss, downloading from {}", url);
            Self::download(client, url, &cache_file)?;
        }

        let text = std::fs::read_to_string(&cache_file)
            .map_err(|e| InventoryError::CacheRead(cache_file.clone(), e))?;
        let stations = Self::parse(&text)?;
        info!("Loaded {} stations from inventory", stations.len());
        Ok(InventoryStore { stations })
    }

    /// Downloads the inventory and persists it verbatim. The write goes
    /// through a tempfile in the same directory so the cached file is never
    /// observed half-written.
    fn download(client: &Client, url: &str, cache_file: &Path) -> Result<(), InventoryError> {
        let response = client
            .get(url)
            .send()
            .map_err(|e| InventoryError::Download(url.to_string(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response
            .text()
            .map_err(|e| InventoryError::Download(url.to_string(), e))?;

        let dir = cache_file.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| InventoryError::CacheWrite(cache_file.to_path_buf(), e))?;
        tmp.write_all(body.as_bytes())
            .map_err(|e| InventoryError::CacheWrite(cache_file.to_path_buf(), e))?;
        tmp.persist(cache_file)
            .map_err(|e| InventoryError::CacheWrite(cache_file.to_path_buf(), e.error))?;
        info!(
            "Cached inventory ({} bytes) to {}",
            body.len(),
            cache_file.display()
        );
        Ok(())
    }

    /// Parses the inventory text: modification-date line, two disclaimer
    /// lines, then the station table.
    fn parse(text: &str) -> Result<HashMap<String, Station>, InventoryError> {
        let mut lines = text.lines();
        let modified = lines.next().ok_or(InventoryError::MissingHeader)?;
        debug!("Inventory modification date: {}", modified.trim());
        lines.next();
        lines.next();
        let table = lines.collect::<Vec<_>>().join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(table.as_bytes());
        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h == name);
        let name_at = position("Name").ok_or(InventoryError::MissingHeader)?;
        let station_id_at = position("Station ID");
        let latitude_at = position("Latitude (Decimal Degrees)");
        let longitude_at = position("Longitude (Decimal Degrees)");
        let overall_at = (position("First Year"), position("Last Year"));
        let hourly_at = (position("HLY First Year"), position("HLY Last Year"));
        let daily_at = (position("DLY First Year"), position("DLY Last Year"));
        let monthly_at = (position("MLY First Year"), position("MLY Last Year"));

        let mut stations = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let name = field(&record, Some(name_at));
            let station = Station {
                name: name.clone(),
                station_id: field(&record, station_id_at),
                latitude: field(&record, latitude_at),
                longitude: field(&record, longitude_at),
                overall: range(&record, overall_at),
                hourly: range(&record, hourly_at),
                daily: range(&record, daily_at),
                monthly: range(&record, monthly_at),
            };
            // Duplicate names overwrite, last row wins.
            stations.insert(name, station);
        }
        Ok(stations)
    }

    /// Looks up a station by name.
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }

    /// Iterates over all stations, in no particular order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_stations(stations: impl IntoIterator<Item = Station>) -> Self {
        InventoryStore {
            stations: stations
                .into_iter()
                .map(|station| (station.name.clone(), station))
                .collect(),
        }
    }
}

fn field(record: &StringRecord, at: Option<usize>) -> String {
    at.and_then(|i| record.get(i)).unwrap_or("").to_string()
}

fn range(record: &StringRecord, at: (Option<usize>, Option<usize>)) -> YearRange {
    YearRange::from_fields(&field(record, at.0), &field(record, at.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::serve_once;
    use std::net::TcpListener;
    use tempfile::tempdir;

    const INVENTORY_TEXT: &str = "\
Modified Date: 2019-05-09
\"Disclaimer: this inventory is provided as is.\"
\"Avertissement.\"
\"Name\",\"Province\",\"Climate ID\",\"Station ID\",\"WMO ID\",\"TC ID\",\"Latitude (Decimal Degrees)\",\"Longitude (Decimal Degrees)\",\"First Year\",\"Last Year\",\"HLY First Year\",\"HLY Last Year\",\"DLY First Year\",\"DLY Last Year\",\"MLY First Year\",\"MLY Last Year\"
\"TORONTO\",\"ONTARIO\",\"6158350\",\"5051\",\"71266\",\"\",\"43.67\",\"-79.4\",\"1840\",\"2017\",\"1953\",\"1969\",\"1840\",\"2017\",\"1840\",\"2006\"
\"ORILLIA\",\"ONTARIO\",\"6115811\",\"4625\",\"\",\"\",\"44.6\",\"-79.42\",\"1871\",\"2017\",\"\",\"\",\"1871\",\"2017\",\"1871\",\"2017\"
";

    #[test]
    fn parses_stations_keyed_by_name() {
        let stations = InventoryStore::parse(INVENTORY_TEXT).unwrap();
        assert_eq!(stations.len(), 2);

        let toronto = &stations["TORONTO"];
        assert_eq!(toronto.station_id, "5051");
        assert_eq!(toronto.latitude, "43.67");
        assert_eq!(toronto.longitude, "-79.4");
        assert_eq!(toronto.overall, YearRange::from_fields("1840", "2017"));
        assert_eq!(toronto.hourly, YearRange::from_fields("1953", "1969"));
        assert_eq!(toronto.monthly, YearRange::from_fields("1840", "2006"));

        let orillia = &stations["ORILLIA"];
        assert_eq!(orillia.hourly, YearRange::default());
    }

    #[test]
    fn duplicate_names_keep_the_later_row() {
        let text = format!(
            "{}\"TORONTO\",\"ONTARIO\",\"6158355\",\"5097\",\"\",\"\",\"43.63\",\"-79.4\",\"1937\",\"2017\",\"1953\",\"2017\",\"1937\",\"2017\",\"1937\",\"2006\"\n",
            INVENTORY_TEXT
        );
        let stations = InventoryStore::parse(&text).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations["TORONTO"].station_id, "5097");
    }

    #[test]
    fn missing_station_table_is_a_parse_error() {
        let truncated = "Modified Date: 2019-05-09\ndisclaimer\ndisclaimer\n";
        assert!(matches!(
            InventoryStore::parse(truncated),
            Err(InventoryError::MissingHeader)
        ));
        assert!(matches!(
            InventoryStore::parse(""),
            Err(InventoryError::MissingHeader)
        ));
    }

    #[test]
    fn load_reads_a_cached_file_without_downloading() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(INVENTORY_FILE_NAME), INVENTORY_TEXT).unwrap();

        // An unroutable URL proves no download happens on a cache hit.
        let store = InventoryStore::load_from_url(
            dir.path(),
            &Client::new(),
            "http://127.0.0.1:1/inventory.csv",
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get("ORILLIA").is_some());
        assert!(store.get("MONTREAL").is_none());
    }

    #[test]
    fn load_downloads_caches_and_parses_on_a_cache_miss() {
        let dir = tempdir().unwrap();
        let url = serve_once("200 OK", INVENTORY_TEXT);

        let store = InventoryStore::load_from_url(dir.path(), &Client::new(), &url).unwrap();
        assert_eq!(store.len(), 2);

        // The cached copy is the verbatim response body.
        let cached = std::fs::read_to_string(dir.path().join(INVENTORY_FILE_NAME)).unwrap();
        assert_eq!(cached, INVENTORY_TEXT);
    }

    #[test]
    fn non_success_status_fails_the_load() {
        let dir = tempdir().unwrap();
        let url = serve_once("503 Service Unavailable", "");

        let result = InventoryStore::load_from_url(dir.path(), &Client::new(), &url);
        assert!(matches!(result, Err(InventoryError::Status { .. })));
        assert!(!dir.path().join(INVENTORY_FILE_NAME).exists());
    }

    #[test]
    fn unreachable_source_fails_the_load() {
        let dir = tempdir().unwrap();
        // Bind then drop a listener so the port is very likely closed.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/inventory.csv", port);

        let result = InventoryStore::load_from_url(dir.path(), &Client::new(), &url);
        assert!(matches!(result, Err(InventoryError::Download(..))));
    }
}
