//! Data structures representing stations from the Environment and Climate
//! Change Canada station inventory: identifiers, coordinates, and
//! per-granularity coverage ranges.

/// One row of the ECCC station inventory.
///
/// Fields are carried verbatim as the inventory publishes them: the station ID
/// is only ever interpolated into request URLs, and coordinates are parsed at
/// query time so that a malformed value surfaces exactly when it is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// The station name, which acts as the primary key of the inventory.
    /// Duplicate names overwrite each other during loading, last row wins.
    pub name: String,
    /// The provider-assigned station identifier used by the bulk-data endpoint.
    pub station_id: String,
    /// Latitude in decimal degrees, as published.
    pub latitude: String,
    /// Longitude in decimal degrees, as published.
    pub longitude: String,
    /// The years the station was active overall.
    pub overall: YearRange,
    /// The years with hourly records.
    pub hourly: YearRange,
    /// The years with daily records.
    pub daily: YearRange,
    /// The years with monthly records.
    pub monthly: YearRange,
}

/// A (first year, last year) coverage span, where `None` means the inventory
/// left the field empty (coverage unknown or absent).
///
/// Equality is exact on both ends. An absent edge compares unequal to any
/// populated edge, so a granularity missing a field never counts as matching
/// a populated overall range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearRange {
    /// First year of coverage, if reported.
    pub first: Option<String>,
    /// Last year of coverage, if reported.
    pub last: Option<String>,
}

impl YearRange {
    /// Builds a range from raw inventory fields, mapping empty text to `None`.
    pub(crate) fn from_fields(first: &str, last: &str) -> Self {
        let edge = |raw: &str| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        YearRange {
            first: edge(first),
            last: edge(last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_become_absent_edges() {
        let range = YearRange::from_fields("", " ");
        assert_eq!(range, YearRange::default());
    }

    #[test]
    fn populated_fields_are_trimmed() {
        let range = YearRange::from_fields(" 1970", "2008 ");
        assert_eq!(range.first.as_deref(), Some("1970"));
        assert_eq!(range.last.as_deref(), Some("2008"));
    }

    #[test]
    fn absent_edge_is_not_equal_to_populated_edge() {
        let populated = YearRange::from_fields("1970", "2008");
        let half = YearRange::from_fields("1970", "");
        assert_ne!(populated, half);
        assert_eq!(YearRange::default(), YearRange::from_fields("", ""));
    }
}
