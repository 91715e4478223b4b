//! The model for which the production split is estimated.
use crate::input::capacity::CapacityByMonth;
use crate::input::consumption::ConsumptionRecord;
use crate::input::read_toml;
use crate::priority::PriorityTable;
use crate::zone::ZoneID;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

const MODEL_FILE_NAME: &str = "model.toml";

/// Represents the contents of the model configuration file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// The zone the datasets describe
    pub zone: ZoneID,
    /// The merit order used for dispatch; the canonical curve if omitted
    #[serde(default)]
    pub merit_order: PriorityTable,
}

impl ModelConfig {
    /// Read the model configuration from the specified model directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing the model configuration and datasets
    pub fn from_path(model_dir: &Path) -> Result<Self> {
        read_toml(&model_dir.join(MODEL_FILE_NAME))
    }
}

/// A fully loaded model: configuration plus the two input datasets.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// The zone the datasets describe
    pub zone: ZoneID,
    /// The merit order used for dispatch
    pub merit_order: PriorityTable,
    /// One consumption record per hour
    pub consumption: Vec<ConsumptionRecord>,
    /// Per-source capacities for every month
    pub capacity: CapacityByMonth,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_model_config_from_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(MODEL_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                "zone = \"KR\"
merit_order = [[\"solar\", \"hydro\", \"wind\", \"biomass\"], [\"others\"], [\"nuclear\"], \
                 [\"coal\"], [\"gas\"], [\"oil\"]]"
            )
            .unwrap();
        }

        let config = ModelConfig::from_path(dir.path()).unwrap();
        assert_eq!(
            config,
            ModelConfig {
                zone: "KR".into(),
                merit_order: PriorityTable::default(),
            }
        );
    }

    #[test]
    fn test_model_config_default_merit_order() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(MODEL_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "zone = \"KR\"").unwrap();
        }

        let config = ModelConfig::from_path(dir.path()).unwrap();
        assert_eq!(config.merit_order, PriorityTable::default());
    }

    #[test]
    fn test_model_config_invalid_merit_order() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(MODEL_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            // coal is ranked twice
            writeln!(
                file,
                "zone = \"KR\"\nmerit_order = [[\"coal\"], [\"coal\"]]"
            )
            .unwrap();
        }

        assert!(ModelConfig::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_model_config_unknown_source() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(MODEL_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                "zone = \"KR\"\nmerit_order = [[\"geothermal\"]]"
            )
            .unwrap();
        }

        assert!(ModelConfig::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_model_config_missing_zone() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(MODEL_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "merit_order = [[\"{}\"]]", Source::Solar).unwrap();
        }

        assert!(ModelConfig::from_path(dir.path()).is_err());
    }
}
