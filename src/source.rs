//! The canonical set of electricity generation sources.
use indexmap::IndexMap;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// A generation source for which capacity and production figures exist.
///
/// Variants are declared in alphabetical order so that the derived [`Ord`]
/// matches the order of the production columns in the output file.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Source {
    /// Biomass plants
    #[string = "biomass"]
    Biomass,
    /// Coal-fired plants (all coal types combined)
    #[string = "coal"]
    Coal,
    /// Gas-fired plants
    #[string = "gas"]
    Gas,
    /// Hydro power, including pumped storage
    #[string = "hydro"]
    Hydro,
    /// Nuclear plants
    #[string = "nuclear"]
    Nuclear,
    /// Oil-fired plants
    #[string = "oil"]
    Oil,
    /// Residual capacity not attributed to a named source
    #[string = "others"]
    Others,
    /// Solar power
    #[string = "solar"]
    Solar,
    /// Wind power
    #[string = "wind"]
    Wind,
}

/// Available capacity per source for a single month
pub type SourceCapacities = IndexMap<Source, f64>;

impl Source {
    /// Every source, in alphabetical order
    pub const ALL: [Source; 9] = [
        Source::Biomass,
        Source::Coal,
        Source::Gas,
        Source::Hydro,
        Source::Nuclear,
        Source::Oil,
        Source::Others,
        Source::Solar,
        Source::Wind,
    ];

    /// The lowercase name used in input and output files
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Biomass => "biomass",
            Source::Coal => "coal",
            Source::Gas => "gas",
            Source::Hydro => "hydro",
            Source::Nuclear => "nuclear",
            Source::Oil => "oil",
            Source::Others => "others",
            Source::Solar => "solar",
            Source::Wind => "wind",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use serde::Deserialize;

    #[test]
    fn test_all_is_alphabetical() {
        assert!(Source::ALL.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn test_deserialise_label() {
        #[derive(Deserialize)]
        struct Wrapper {
            source: Source,
        }

        let wrapper: Wrapper = toml::from_str("source = \"solar\"").unwrap();
        assert_eq!(wrapper.source, Source::Solar);
        assert!(toml::from_str::<Wrapper>("source = \"geothermal\"").is_err());
    }

    #[test]
    fn test_display_matches_label() {
        for source in Source::ALL {
            assert_eq!(source.to_string(), source.as_str());
        }
    }
}
