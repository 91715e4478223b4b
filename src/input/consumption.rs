//! Code for reading the hourly consumption dataset from a CSV file.
use crate::error::SplitError;
use crate::input::*;
use crate::month::Month;
use crate::zone::ZoneID;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::Path;

const CONSUMPTION_FILE_NAME: &str = "consumption.csv";

/// One hour of total consumption for the zone.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConsumptionRecord {
    /// Month key linking the hour to the capacity dataset
    pub month: Month,
    /// The hour this record covers
    #[serde(deserialize_with = "deserialise_datetime")]
    pub datetime: NaiveDateTime,
    /// Unix epoch seconds equivalent of `datetime`
    pub timestamp: i64,
    /// The zone the record belongs to
    pub zone_name: ZoneID,
    /// Average power drawn over the hour
    pub total_consumption_average: f64,
}

/// Check the records against the declared zone and the data invariants
fn validate_consumption_records(records: &[ConsumptionRecord], zone: &ZoneID) -> Result<()> {
    for record in records {
        if record.total_consumption_average < 0.0 {
            Err(SplitError::invalid_input(format!(
                "consumption at {} is negative ({})",
                record.datetime, record.total_consumption_average
            )))?;
        }
        if record.zone_name != *zone {
            Err(SplitError::invalid_input(format!(
                "record at {} belongs to zone {}, expected {zone}",
                record.datetime, record.zone_name
            )))?;
        }

        // the month key is derived from the datetime upstream
        let expected = Month::containing(&record.datetime);
        if record.month != expected {
            Err(SplitError::invalid_input(format!(
                "record at {} carries month {} instead of {expected}",
                record.datetime, record.month
            )))?;
        }
    }

    Ok(())
}

/// Read the hourly consumption dataset from the specified model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing the model configuration and datasets
/// * `zone` - The zone declared in the model configuration
///
/// # Returns
///
/// One record per hour, in file order, or an error if the file is missing or
/// a record is invalid.
pub fn read_consumption(model_dir: &Path, zone: &ZoneID) -> Result<Vec<ConsumptionRecord>> {
    let file_path = model_dir.join(CONSUMPTION_FILE_NAME);
    let records = read_csv(&file_path)?;
    validate_consumption_records(&records, zone).with_context(|| input_err_msg(&file_path))?;

    Ok(records)
}
