//! The module responsible for writing output data to disk.
use crate::input::{deserialise_datetime, serialise_datetime};
use crate::source::Source;
use crate::split::HourlyProduction;
use crate::zone::ZoneID;
use anyhow::{Context, Result, ensure};
use chrono::prelude::*;
use platform_info::{PlatformInfo, PlatformInfoAPI, UNameAPI};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "meritsplit_results";

/// The output file name for the hourly production split
const PRODUCTION_FILE_NAME: &str = "hourly_production_by_source.csv";

/// The output file name for metadata
const METADATA_FILE_NAME: &str = "metadata.toml";

/// Get the default output folder for the model at the specified path
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // canonicalise in case the user has specified "."
    let model_dir = model_dir
        .canonicalize()
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model.
///
/// # Arguments
///
/// * `output_dir` - The folder to create
/// * `overwrite` - Whether an existing folder may be replaced
///
/// # Returns
///
/// Whether an existing folder was replaced, or an error if the folder exists
/// and `overwrite` is not set.
pub fn create_output_directory(output_dir: &Path, overwrite: bool) -> Result<bool> {
    let existed = output_dir.is_dir();
    if existed {
        ensure!(
            overwrite,
            "Output directory {} already exists (use --overwrite to replace it)",
            output_dir.display()
        );
        fs::remove_dir_all(output_dir).context("Could not remove existing output directory")?;
    }
    fs::create_dir_all(output_dir)?;

    Ok(existed)
}

/// Represents a row in the production CSV file.
///
/// The production columns are in alphabetical source order, independent of
/// the merit-order ranks; the month key is dropped.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ProductionRow {
    #[serde(
        serialize_with = "serialise_datetime",
        deserialize_with = "deserialise_datetime"
    )]
    datetime: NaiveDateTime,
    timestamp: i64,
    zone_name: ZoneID,
    total_consumption_average: f64,
    power_production_biomass_avg: f64,
    power_production_coal_avg: f64,
    power_production_gas_avg: f64,
    power_production_hydro_avg: f64,
    power_production_nuclear_avg: f64,
    power_production_oil_avg: f64,
    power_production_others_avg: f64,
    power_production_solar_avg: f64,
    power_production_wind_avg: f64,
}

impl ProductionRow {
    /// Create a new [`ProductionRow`]
    fn new(row: &HourlyProduction) -> Self {
        let production = |source| row.production.get(&source).copied().unwrap_or_default();
        Self {
            datetime: row.datetime,
            timestamp: row.timestamp,
            zone_name: row.zone_name.clone(),
            total_consumption_average: row.total_consumption_average,
            power_production_biomass_avg: production(Source::Biomass),
            power_production_coal_avg: production(Source::Coal),
            power_production_gas_avg: production(Source::Gas),
            power_production_hydro_avg: production(Source::Hydro),
            power_production_nuclear_avg: production(Source::Nuclear),
            power_production_oil_avg: production(Source::Oil),
            power_production_others_avg: production(Source::Others),
            power_production_solar_avg: production(Source::Solar),
            power_production_wind_avg: production(Source::Wind),
        }
    }
}

/// An object for writing the production split to file
pub struct DataWriter {
    production_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open a CSV file to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where the file will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let file_path = output_path.join(PRODUCTION_FILE_NAME);
        Ok(Self {
            production_writer: csv::Writer::from_path(file_path)?,
        })
    }

    /// Write hourly production records to the CSV file
    pub fn write_production<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: Iterator<Item = &'a HourlyProduction>,
    {
        for row in rows {
            self.production_writer.serialize(ProductionRow::new(row))?;
        }

        Ok(())
    }

    /// Flush the underlying stream
    pub fn flush(&mut self) -> Result<()> {
        self.production_writer.flush()?;

        Ok(())
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    run: RunMetadata<'a>,
    program: ProgramMetadata<'a>,
    platform: PlatformMetadata,
}

/// Information about the model run
#[derive(Serialize)]
struct RunMetadata<'a> {
    /// Path to the model which was run
    model_path: &'a Path,
    /// The date and time on which the run started
    datetime: String,
}

impl<'a> RunMetadata<'a> {
    fn new(model_path: &'a Path) -> Self {
        let dt = Local::now();
        Self {
            model_path,
            datetime: dt.to_rfc2822(),
        }
    }
}

#[derive(Serialize)]
struct ProgramMetadata<'a> {
    /// The program name
    name: &'a str,
    /// The program version as specified in Cargo.toml
    version: &'a str,
    /// Whether it is a debug build
    is_debug: bool,
}

impl Default for ProgramMetadata<'_> {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            is_debug: cfg!(debug_assertions),
        }
    }
}

/// Information about the platform on which the program is running.
///
/// The fields correspond to different data available from the [`PlatformInfo`] struct.
#[derive(Serialize)]
struct PlatformMetadata {
    sysname: String,
    nodename: String,
    release: String,
    version: String,
    machine: String,
    osname: String,
}

impl Default for PlatformMetadata {
    fn default() -> Self {
        let info = PlatformInfo::new().expect("Unable to determine platform info");
        Self {
            sysname: info.sysname().to_string_lossy().into(),
            nodename: info.nodename().to_string_lossy().into(),
            release: info.release().to_string_lossy().into(),
            version: info.version().to_string_lossy().into(),
            machine: info.machine().to_string_lossy().into(),
            osname: info.osname().to_string_lossy().into(),
        }
    }
}

/// Write metadata to the specified output path in TOML format
pub fn write_metadata(output_path: &Path, model_path: &Path) -> Result<()> {
    let metadata = Metadata {
        run: RunMetadata::new(model_path),
        program: ProgramMetadata::default(),
        platform: PlatformMetadata::default(),
    };
    let file_path = output_path.join(METADATA_FILE_NAME);
    fs::write(&file_path, toml::to_string(&metadata)?)?;

    Ok(())
}
