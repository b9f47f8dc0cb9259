//! Request construction for the ECCC bulk-data endpoint.

use crate::types::granularity::Granularity;

/// The climate bulk-data download endpoint.
pub const BULK_DATA_ENDPOINT: &str = "https://climate.weather.gc.ca/climate_data/bulk_data_e.html";

/// Builds the bulk-data URL for one station, period, and granularity.
///
/// `Day` is pinned to 1 for every granularity: the endpoint keys monthly
/// requests to the whole record, daily requests to the year, and hourly
/// requests to the month, so the day field never selects data. True
/// day-by-day retrieval would have to iterate periods instead.
pub fn bulk_data_url(station_id: &str, year: i32, month: u32, granularity: Granularity) -> String {
    format!(
        "{}?{}",
        BULK_DATA_ENDPOINT,
        bulk_data_query(station_id, year, month, granularity)
    )
}

/// The query-string portion, shared with mirror-endpoint requests.
pub(crate) fn bulk_data_query(
    station_id: &str,
    year: i32,
    month: u32,
    granularity: Granularity,
) -> String {
    format!(
        "format=csv&stationID={}&Year={}&Month={}&Day=1&timeframe={}&submit=Download+Data",
        station_id,
        year,
        month,
        granularity.timeframe_code()
    )
}
