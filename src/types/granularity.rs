//! The observation granularities offered by the ECCC bulk-data endpoint.

use std::fmt;

/// Resolution of climate records, matching the endpoint's `timeframe` codes.
///
/// Note the endpoint keys responses differently per granularity: a monthly
/// request returns the station's entire monthly record, a daily request
/// returns a full year, and an hourly request returns a full month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One record per hour, `timeframe=1`.
    Hourly,
    /// One record per day, `timeframe=2`.
    Daily,
    /// One record per month, `timeframe=3`.
    Monthly,
}

impl Granularity {
    /// The `timeframe` query-parameter code the endpoint expects.
    pub(crate) fn timeframe_code(&self) -> u8 {
        match self {
            Granularity::Hourly => 1,
            Granularity::Daily => 2,
            Granularity::Monthly => 3,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        };
        write!(f, "{}", name)
    }
}
