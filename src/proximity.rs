//! Great-circle proximity filtering over the loaded station inventory.

use crate::inventory::store::InventoryStore;
use crate::types::station::Station;
use haversine::{distance, Location, Units};
use std::collections::HashSet;
use thiserror::Error;

/// Search radius used when the caller does not supply one.
pub const DEFAULT_RADIUS_KM: f64 = 25.0;

#[derive(Debug, Error)]
pub enum ProximityError {
    #[error("Station '{station}' has a malformed {field} value '{value}'")]
    MalformedCoordinate {
        station: String,
        field: &'static str,
        value: String,
    },
}

/// Returns the names of all stations within `radius_km` of the query point,
/// boundary inclusive.
///
/// Every station in the store is measured with the haversine great-circle
/// distance (mean Earth radius, 6371 km). The result is an unordered set; an
/// empty store yields an empty set. The inventory is trusted: one malformed
/// coordinate fails the whole call rather than skipping the station.
pub fn stations_near(
    store: &InventoryStore,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Result<HashSet<String>, ProximityError> {
    let mut within = HashSet::new();
    for station in store.stations() {
        let station_lat = parse_coordinate(station, "latitude", &station.latitude)?;
        let station_lon = parse_coordinate(station, "longitude", &station.longitude)?;
        let km = distance_km(latitude, longitude, station_lat, station_lon);
        if km <= radius_km {
            within.insert(station.name.clone());
        }
    }
    Ok(within)
}

/// Haversine distance in kilometers between two latitude/longitude points.
pub fn distance_km(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> f64 {
    distance(
        Location {
            latitude: from_lat,
            longitude: from_lon,
        },
        Location {
            latitude: to_lat,
            longitude: to_lon,
        },
        Units::Kilometers,
    )
}

fn parse_coordinate(
    station: &Station,
    field: &'static str,
    raw: &str,
) -> Result<f64, ProximityError> {
    raw.trim()
        .parse()
        .map_err(|_| ProximityError::MalformedCoordinate {
            station: station.name.clone(),
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::station::{Station, YearRange};

    fn station(name: &str, latitude: &str, longitude: &str) -> Station {
        Station {
            name: name.to_string(),
            station_id: "1".to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            overall: YearRange::default(),
            hourly: YearRange::default(),
            daily: YearRange::default(),
            monthly: YearRange::default(),
        }
    }

    #[test]
    fn station_at_the_query_point_is_included_at_radius_zero() {
        let store = InventoryStore::from_stations([station("HERE", "45", "-79")]);
        let names = stations_near(&store, 45.0, -79.0, 0.0).unwrap();
        assert!(names.contains("HERE"));
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(45.0, -79.0, 43.67, -79.4);
        let back = distance_km(43.67, -79.4, 45.0, -79.0);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let store = InventoryStore::from_stations([station("NORTH", "46", "-79")]);
        let km = distance_km(45.0, -79.0, 46.0, -79.0);
        assert!((km - 111.0).abs() < 1.0, "got {} km", km);

        assert!(stations_near(&store, 45.0, -79.0, 25.0).unwrap().is_empty());
        assert!(stations_near(&store, 45.0, -79.0, 120.0)
            .unwrap()
            .contains("NORTH"));
    }

    #[test]
    fn boundary_is_inclusive() {
        let store = InventoryStore::from_stations([station("EDGE", "46", "-79")]);
        let km = distance_km(45.0, -79.0, 46.0, -79.0);
        assert!(stations_near(&store, 45.0, -79.0, km).unwrap().contains("EDGE"));
    }

    #[test]
    fn empty_store_yields_an_empty_set() {
        let store = InventoryStore::from_stations(std::iter::empty());
        assert!(stations_near(&store, 45.0, -79.0, 25.0).unwrap().is_empty());
    }

    #[test]
    fn only_stations_within_the_radius_are_returned() {
        let store = InventoryStore::from_stations([
            station("NEAR", "45.05", "-79.0"),
            station("FAR", "48.0", "-79.0"),
        ]);
        let names = stations_near(&store, 45.0, -79.0, 25.0).unwrap();
        assert_eq!(names, HashSet::from(["NEAR".to_string()]));
    }

    #[test]
    fn malformed_coordinates_fail_the_whole_call() {
        let store = InventoryStore::from_stations([station("BROKEN", "not-a-number", "-79")]);
        let result = stations_near(&store, 45.0, -79.0, 25.0);
        assert!(matches!(
            result,
            Err(ProximityError::MalformedCoordinate { field: "latitude", .. })
        ));
    }
}
