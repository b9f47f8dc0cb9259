//! Reconciles a station's per-granularity coverage ranges against its overall
//! active period.
//!
//! "Full" coverage is exact equality of a granularity's (first year, last
//! year) pair with the overall pair, not overlap: a range one year shorter on
//! either end is not full, and an absent field never matches a populated one.

use crate::types::station::{Station, YearRange};

/// True iff the station's monthly range equals its overall range on both ends.
pub fn full_monthly(station: &Station) -> bool {
    station.monthly == station.overall
}

/// True iff the station's daily range equals its overall range on both ends.
pub fn full_daily(station: &Station) -> bool {
    station.daily == station.overall
}

/// Whether filling one granularity's gaps from a finer granularity needs a
/// lookup before the covered span, after it, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapPlan {
    /// The granularity starts later than the overall record (or has no start),
    /// so an earlier-period lookup is needed.
    pub needs_earlier: bool,
    /// The granularity ends sooner than the overall record (or has no end),
    /// so a later-period lookup is needed.
    pub needs_later: bool,
}

impl GapPlan {
    /// True when no gap-filling lookup is required on either side.
    pub fn is_complete(&self) -> bool {
        !self.needs_earlier && !self.needs_later
    }
}

/// A station's coverage ranges and the lookups needed to close their gaps.
///
/// This is a plan, not data: producing it performs no fetch. Monthly gaps are
/// filled from daily records and daily gaps from hourly records, so the two
/// plans compare those granularities against the overall range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub station: String,
    pub overall: YearRange,
    pub hourly: YearRange,
    pub daily: YearRange,
    pub monthly: YearRange,
    /// Lookups needed to fill monthly gaps from daily data.
    pub monthly_from_daily: GapPlan,
    /// Lookups needed to fill daily gaps from hourly data.
    pub daily_from_hourly: GapPlan,
}

/// Builds the coverage report for one station.
pub fn station_dates(station: &Station) -> CoverageReport {
    CoverageReport {
        station: station.name.clone(),
        overall: station.overall.clone(),
        hourly: station.hourly.clone(),
        daily: station.daily.clone(),
        monthly: station.monthly.clone(),
        monthly_from_daily: gap_plan(&station.overall, &station.monthly),
        daily_from_hourly: gap_plan(&station.overall, &station.daily),
    }
}

fn gap_plan(overall: &YearRange, granularity: &YearRange) -> GapPlan {
    GapPlan {
        needs_earlier: edge_gap(&overall.first, &granularity.first, |o, g| g > o),
        needs_later: edge_gap(&overall.last, &granularity.last, |o, g| g < o),
    }
}

/// A gap exists when the granularity edge falls short of a populated overall
/// edge, or is absent entirely. With no overall edge there is nothing to fill
/// toward. Unparsable year text counts as absent.
fn edge_gap(
    overall: &Option<String>,
    granularity: &Option<String>,
    falls_short: impl Fn(i32, i32) -> bool,
) -> bool {
    let Some(overall_year) = parse_year(overall) else {
        return false;
    };
    match parse_year(granularity) {
        Some(year) => falls_short(overall_year, year),
        None => true,
    }
}

fn parse_year(edge: &Option<String>) -> Option<i32> {
    edge.as_deref().and_then(|v| v.trim().parse().ok())
}
