//! The merit order: which sources are dispatched first.
//!
//! The table is an ordered list of ranks, each holding a non-empty set of
//! sources. Rank 1 is dispatched first. A rank holding more than one source
//! is treated as must-run: all of its sources are dispatched at full
//! capacity, without checking remaining demand.
use crate::error::SplitError;
use crate::source::{Source, SourceCapacities};
use anyhow::Result;
use indexmap::IndexSet;
use itertools::Itertools;
use serde::Deserialize;

/// A priority-ordered table of generation sources.
///
/// Ranks are contiguous starting at 1 (the position in the underlying list)
/// and every source appears in at most one rank.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Vec<Source>>")]
pub struct PriorityTable {
    ranks: Vec<IndexSet<Source>>,
}

impl PriorityTable {
    /// Create a priority table from ranks ordered highest priority first.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty, if any rank is empty or if a source
    /// appears more than once.
    pub fn new(ranks: Vec<Vec<Source>>) -> Result<Self> {
        if ranks.is_empty() {
            Err(SplitError::configuration("merit order cannot be empty"))?;
        }
        if ranks.iter().any(Vec::is_empty) {
            Err(SplitError::configuration("merit-order ranks cannot be empty"))?;
        }
        let duplicates: Vec<_> = ranks
            .iter()
            .flatten()
            .duplicates()
            .map(|source| source.as_str())
            .collect();
        if !duplicates.is_empty() {
            Err(SplitError::configuration(format!(
                "sources appear in more than one merit-order rank: {}",
                duplicates.join(", ")
            )))?;
        }

        Ok(Self {
            ranks: ranks.into_iter().map(IndexSet::from_iter).collect(),
        })
    }

    /// Iterate over the source sets in rank order, highest priority first
    pub fn ranks(&self) -> impl Iterator<Item = &IndexSet<Source>> {
        self.ranks.iter()
    }

    /// Iterate over every source in the table, in rank order
    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.ranks.iter().flatten().copied()
    }

    /// Check that the table and a capacity mapping cover the same sources.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if a source has capacity data but no
    /// rank, or a rank but no capacity data.
    pub fn validate_against(&self, capacities: &SourceCapacities) -> Result<()> {
        for source in capacities.keys() {
            if !self.sources().contains(source) {
                Err(SplitError::configuration(format!(
                    "source {source} has capacity data but no merit-order rank"
                )))?;
            }
        }
        for source in self.sources() {
            if !capacities.contains_key(&source) {
                Err(SplitError::configuration(format!(
                    "source {source} appears in the merit order but has no capacity data"
                )))?;
            }
        }

        Ok(())
    }
}

impl Default for PriorityTable {
    /// The canonical merit-order curve: must-run renewables first, then
    /// others, nuclear, coal, gas and oil.
    fn default() -> Self {
        Self {
            ranks: vec![
                IndexSet::from([Source::Solar, Source::Hydro, Source::Wind, Source::Biomass]),
                IndexSet::from([Source::Others]),
                IndexSet::from([Source::Nuclear]),
                IndexSet::from([Source::Coal]),
                IndexSet::from([Source::Gas]),
                IndexSet::from([Source::Oil]),
            ],
        }
    }
}

impl TryFrom<Vec<Vec<Source>>> for PriorityTable {
    type Error = anyhow::Error;

    fn try_from(ranks: Vec<Vec<Source>>) -> Result<Self> {
        Self::new(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_split_error;

    #[test]
    fn test_default_covers_all_sources() {
        let table = PriorityTable::default();
        assert_eq!(table.sources().sorted().collect_vec(), Source::ALL);
    }

    #[test]
    fn test_new_valid() {
        let table =
            PriorityTable::new(vec![vec![Source::Solar, Source::Wind], vec![Source::Coal]])
                .unwrap();
        let ranks: Vec<_> = table.ranks().collect();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks[0].len(), 2);
        assert!(ranks[1].contains(&Source::Coal));
    }

    #[test]
    fn test_new_empty_table() {
        assert_split_error!(PriorityTable::new(vec![]), SplitError::Configuration(_));
    }

    #[test]
    fn test_new_empty_rank() {
        assert_split_error!(
            PriorityTable::new(vec![vec![Source::Solar], vec![]]),
            SplitError::Configuration(_)
        );
    }

    #[test]
    fn test_new_duplicate_source() {
        // across ranks
        assert_split_error!(
            PriorityTable::new(vec![vec![Source::Solar], vec![Source::Solar]]),
            SplitError::Configuration(_)
        );

        // within a rank
        assert_split_error!(
            PriorityTable::new(vec![vec![Source::Solar, Source::Solar]]),
            SplitError::Configuration(_)
        );
    }

    #[test]
    fn test_validate_against() {
        let table = PriorityTable::default();
        let capacities: SourceCapacities = Source::ALL.map(|source| (source, 1.0)).into();
        assert!(table.validate_against(&capacities).is_ok());

        // a capacity column with no rank
        let table = PriorityTable::new(vec![vec![Source::Solar]]).unwrap();
        assert_split_error!(
            table.validate_against(&capacities),
            SplitError::Configuration(_)
        );

        // a rank with no capacity column
        let table = PriorityTable::default();
        let capacities: SourceCapacities = [(Source::Solar, 1.0)].into();
        assert_split_error!(
            table.validate_against(&capacities),
            SplitError::Configuration(_)
        );
    }

    #[test]
    fn test_deserialise() {
        #[derive(Deserialize)]
        struct Wrapper {
            merit_order: PriorityTable,
        }

        let wrapper: Wrapper =
            toml::from_str("merit_order = [[\"solar\", \"wind\"], [\"coal\"]]").unwrap();
        assert_eq!(
            wrapper.merit_order,
            PriorityTable::new(vec![vec![Source::Solar, Source::Wind], vec![Source::Coal]])
                .unwrap()
        );

        // duplicates are rejected via the TryFrom validation
        assert!(toml::from_str::<Wrapper>("merit_order = [[\"coal\"], [\"coal\"]]").is_err());
    }
}
