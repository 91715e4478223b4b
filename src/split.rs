//! Functionality for estimating the hourly production split.
//!
//! The hourly consumption dataset is joined to the monthly capacity dataset
//! on the month key, each joined hour is dispatched independently and the
//! results are collected into one table, sorted by timestamp.
use crate::dispatch::dispatch_hour;
use crate::error::SplitError;
use crate::model::Model;
use crate::month::Month;
use crate::output::DataWriter;
use crate::source::Source;
use crate::zone::ZoneID;
use anyhow::Result;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use log::{info, warn};
use std::path::Path;

/// One hour of the estimated production split.
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyProduction {
    /// Month key; only used for the join, dropped from the output
    pub month: Month,
    /// The hour this record covers
    pub datetime: NaiveDateTime,
    /// Unix epoch seconds equivalent of `datetime`
    pub timestamp: i64,
    /// The zone the record belongs to
    pub zone_name: ZoneID,
    /// Average power drawn over the hour
    pub total_consumption_average: f64,
    /// Average power produced by each source over the hour
    pub production: IndexMap<Source, f64>,
    /// Whether installed capacity fell short of consumption for this hour
    pub unmet: bool,
}

/// Estimate the production split for every hour in the model.
///
/// Each hour is joined to its month's capacities and dispatched on its own:
/// no state is carried between hours, so the input order of the consumption
/// records does not affect any row's result.
///
/// # Arguments
///
/// * `model` - The model to estimate the production split for
///
/// # Returns
///
/// One record per hour, sorted ascending by timestamp, or an error if a
/// month is missing from the capacity dataset or a record is invalid.
pub fn build_hourly_production(model: &Model) -> Result<Vec<HourlyProduction>> {
    // Source mismatches abort the run before any hour is dispatched
    for capacities in model.capacity.values() {
        model.merit_order.validate_against(capacities)?;
    }

    let mut rows = Vec::with_capacity(model.consumption.len());
    for record in &model.consumption {
        let capacities = model.capacity.get(&record.month).ok_or_else(|| {
            SplitError::join(format!(
                "no capacity entry for month {} (hour {})",
                record.month, record.datetime
            ))
        })?;
        let dispatch = dispatch_hour(record.total_consumption_average, capacities, &model.merit_order)?;

        rows.push(HourlyProduction {
            month: record.month,
            datetime: record.datetime,
            timestamp: record.timestamp,
            zone_name: record.zone_name.clone(),
            total_consumption_average: record.total_consumption_average,
            production: dispatch.production,
            unmet: dispatch.unmet,
        });
    }
    rows.sort_by_key(|row| row.timestamp);

    let unmet_hours = rows.iter().filter(|row| row.unmet).count();
    if unmet_hours > 0 {
        warn!("Installed capacity could not cover consumption for {unmet_hours} hour(s)");
    }

    Ok(rows)
}

/// Estimate the production split and write the results.
///
/// # Arguments
///
/// * `model` - The model to estimate the production split for
/// * `output_path` - The folder to which output will be saved
pub fn run(model: &Model, output_path: &Path) -> Result<()> {
    info!("Estimating hourly production split for zone {}", model.zone);
    let rows = build_hourly_production(model)?;
    info!(
        "Dispatched {} hours across {} months",
        rows.len(),
        model.capacity.len()
    );

    let mut writer = DataWriter::create(output_path)?;
    writer.write_production(rows.iter())?;
    writer.flush()?;

    Ok(())
}
