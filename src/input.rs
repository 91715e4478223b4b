//! Common routines for handling input data.
use crate::model::{Model, ModelConfig};
use anyhow::{Context, Result, ensure};
use chrono::NaiveDateTime;
use itertools::Itertools;
use log::info;
use serde::de::{Deserialize, DeserializeOwned, Deserializer, Error};
use std::fs;
use std::path::Path;

pub mod capacity;
pub mod consumption;
use capacity::read_capacity;
use consumption::read_consumption;

/// The format used for datetimes in input and output files
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generate the standard error message for when reading an input file fails
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().to_string_lossy())
}

/// Read a series of records from a CSV file into a `Vec`.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(file_path).with_context(|| input_err_msg(file_path))?;
    let records: Vec<T> = reader
        .deserialize()
        .try_collect()
        .with_context(|| input_err_msg(file_path))?;

    ensure!(
        !records.is_empty(),
        "{}: CSV file cannot be empty",
        input_err_msg(file_path)
    );

    Ok(records)
}

/// Parse a TOML file into the given type.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    toml::from_str(&contents).with_context(|| input_err_msg(file_path))
}

/// Read a datetime in the form `YYYY-MM-DD hh:mm:ss`
pub fn deserialise_datetime<'de, D>(deserialiser: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserialiser)?;
    NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
        .map_err(|err| D::Error::custom(format!("Invalid datetime '{s}': {err}")))
}

/// Write a datetime in the form `YYYY-MM-DD hh:mm:ss`
pub fn serialise_datetime<S>(
    datetime: &NaiveDateTime,
    serialiser: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serialiser.collect_str(&datetime.format(DATETIME_FORMAT))
}

/// Load a model from the specified directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing the model configuration and datasets
///
/// # Returns
///
/// The fully loaded and validated model, or an error if a file is missing or
/// its contents are invalid.
pub fn load_model(model_dir: &Path) -> Result<Model> {
    let config = ModelConfig::from_path(model_dir)?;
    let consumption = read_consumption(model_dir, &config.zone)?;
    let capacity = read_capacity(model_dir)?;

    // Source mismatches must surface before any hour is dispatched
    for capacities in capacity.values() {
        config.merit_order.validate_against(capacities)?;
    }

    info!(
        "Read {} hours of consumption and {} months of capacity for zone {}",
        consumption.len(),
        capacity.len(),
        config.zone
    );

    Ok(Model {
        zone: config.zone,
        merit_order: config.merit_order,
        consumption,
        capacity,
    })
}
