//! Code for reading the monthly installed-capacity dataset from a CSV file.
use crate::error::SplitError;
use crate::input::*;
use crate::month::Month;
use crate::source::{Source, SourceCapacities};
use anyhow::{Context, Result, ensure};
use float_cmp::approx_eq;
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use std::path::Path;

const CAPACITY_FILE_NAME: &str = "capacity.csv";

/// Per-source capacities for every month, keyed by month
pub type CapacityByMonth = IndexMap<Month, SourceCapacities>;

/// Installed capacity per source for one month.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CapacityRecord {
    /// The month the capacities apply to
    pub month: Month,
    /// Installed biomass capacity
    pub capacity_biomass: f64,
    /// Installed coal capacity
    pub capacity_coal: f64,
    /// Installed gas capacity
    pub capacity_gas: f64,
    /// Installed hydro capacity
    pub capacity_hydro: f64,
    /// Installed nuclear capacity
    pub capacity_nuclear: f64,
    /// Installed oil capacity
    pub capacity_oil: f64,
    /// Residual capacity not attributed to a named source
    pub capacity_others: f64,
    /// Installed solar capacity
    pub capacity_solar: f64,
    /// Installed wind capacity
    pub capacity_wind: f64,
    /// Total installed capacity across all sources
    pub total_capacity: f64,
}

impl CapacityRecord {
    /// The per-source capacities, keyed in alphabetical source order
    pub fn by_source(&self) -> SourceCapacities {
        SourceCapacities::from([
            (Source::Biomass, self.capacity_biomass),
            (Source::Coal, self.capacity_coal),
            (Source::Gas, self.capacity_gas),
            (Source::Hydro, self.capacity_hydro),
            (Source::Nuclear, self.capacity_nuclear),
            (Source::Oil, self.capacity_oil),
            (Source::Others, self.capacity_others),
            (Source::Solar, self.capacity_solar),
            (Source::Wind, self.capacity_wind),
        ])
    }
}

/// Read capacity data from an iterator of records, keyed by month
fn read_capacity_from_iter<I>(iter: I) -> Result<CapacityByMonth>
where
    I: Iterator<Item = CapacityRecord>,
{
    let mut capacity = CapacityByMonth::new();
    for record in iter {
        let by_source = record.by_source();
        for (source, value) in &by_source {
            if *value < 0.0 {
                Err(SplitError::invalid_input(format!(
                    "capacity for {source} in {} is negative ({value})",
                    record.month
                )))?;
            }
        }

        let named_total: f64 = by_source.values().sum();
        if !approx_eq!(f64, named_total, record.total_capacity, epsilon = 1e-6) {
            warn!(
                "total_capacity for {} is {} but the source columns sum to {named_total}",
                record.month, record.total_capacity
            );
        }

        ensure!(
            capacity.insert(record.month, by_source).is_none(),
            "Duplicate capacity entry for month {}",
            record.month
        );
    }

    Ok(capacity)
}

/// Read the monthly capacity dataset from the specified model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing the model configuration and datasets
///
/// # Returns
///
/// The per-source capacities for every month, or an error if the file is
/// missing, a value is negative or a month appears twice.
pub fn read_capacity(model_dir: &Path) -> Result<CapacityByMonth> {
    let file_path = model_dir.join(CAPACITY_FILE_NAME);
    let records = read_csv::<CapacityRecord>(&file_path)?;
    read_capacity_from_iter(records.into_iter()).with_context(|| input_err_msg(&file_path))
}
