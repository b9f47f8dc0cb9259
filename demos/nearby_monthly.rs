//! Finds stations near a point, keeps the ones with full monthly coverage,
//! and prints their January 1970 monthly records.

use ec_climate::{EcClimate, EcClimateError, Granularity};

fn main() -> Result<(), EcClimateError> {
    let client = EcClimate::new()?;

    let nearby = client
        .stations_near()
        .latitude(45.0)
        .longitude(-79.0)
        .call()?;
    println!("found {} stations", nearby.len());

    for name in nearby {
        if !client.full_monthly(&name)? {
            continue;
        }
        println!("{}", name);
        let Some(series) = client
            .fetch()
            .station(&name)
            .year(1970)
            .month(1)
            .granularity(Granularity::Monthly)
            .call()?
        else {
            continue;
        };
        let mut timestamps: Vec<_> = series.temperature.keys().collect();
        timestamps.sort();
        for timestamp in timestamps {
            println!(
                "  {} temp={:?} precip={:?}",
                timestamp, series.temperature[timestamp], series.precipitation[timestamp]
            );
        }
    }
    println!("done");
    Ok(())
}
