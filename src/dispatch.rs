//! The merit-order dispatch heuristic.
//!
//! Given one hour's consumption and the capacity available to each source,
//! sources are dispatched in merit order: each rank fills only the demand
//! left unmet by higher-priority ranks, up to its capacity. At most one
//! source per hour ends up partially dispatched (the marginal source); every
//! source above it runs at full capacity and every source below it at zero.
use crate::error::SplitError;
use crate::priority::PriorityTable;
use crate::source::{Source, SourceCapacities};
use anyhow::Result;
use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;

/// The outcome of dispatching generation to cover one hour of consumption.
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyDispatch {
    /// Average power produced by each source over the hour, keyed in
    /// alphabetical source order
    pub production: IndexMap<Source, f64>,
    /// Whether installed capacity fell short of consumption
    pub unmet: bool,
}

/// Dispatch generation sources in merit order to cover one hour's consumption.
///
/// Single-source ranks are dispatched at full capacity while demand remains,
/// with the last one reached running partially (the marginal source).
/// Multi-source ranks are must-run: every source in them is dispatched at
/// full capacity without checking remaining demand, on the assumption that
/// their aggregate capacity stays below demand. If that assumption is
/// violated the overshoot is retained and a warning is logged.
///
/// # Arguments
///
/// * `consumption` - Total demand for the hour (non-negative)
/// * `capacities` - Available capacity per source (non-negative)
/// * `merit_order` - The priority table; must cover exactly the sources in
///   `capacities`
///
/// # Returns
///
/// The production assigned to every source, together with a flag indicating
/// whether demand was left unmet because total capacity was insufficient.
pub fn dispatch_hour(
    consumption: f64,
    capacities: &SourceCapacities,
    merit_order: &PriorityTable,
) -> Result<HourlyDispatch> {
    if consumption < 0.0 {
        Err(SplitError::invalid_input(format!(
            "consumption must be non-negative, got {consumption}"
        )))?;
    }
    for (source, &capacity) in capacities {
        if capacity < 0.0 {
            Err(SplitError::invalid_input(format!(
                "capacity for {source} must be non-negative, got {capacity}"
            )))?;
        }
    }
    merit_order.validate_against(capacities)?;

    let mut production: IndexMap<Source, f64> = capacities
        .keys()
        .copied()
        .sorted_unstable()
        .map(|source| (source, 0.0))
        .collect();
    let mut produced = 0.0;

    for sources in merit_order.ranks() {
        if produced >= consumption {
            break;
        }

        if sources.len() == 1 {
            let source = sources[0];
            let capacity = capacities[&source];
            let remaining = consumption - produced;
            if remaining >= capacity {
                // base-loaded: runs at full capacity
                production[&source] = capacity;
                produced += capacity;
            } else {
                // marginal: covers exactly the remaining demand
                production[&source] = remaining;
                produced = consumption;
            }
        } else {
            // must-run rank: dispatched in full, no marginal check
            for &source in sources {
                let capacity = capacities[&source];
                production[&source] = capacity;
                produced += capacity;
            }
            if produced > consumption {
                warn!(
                    "must-run sources produced {produced} against a consumption of {consumption}; \
                     the overshoot is retained"
                );
            }
        }
    }

    Ok(HourlyDispatch {
        production,
        unmet: produced < consumption,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_split_error, capacities, merit_order};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    /// Sources fill remaining demand in rank order; coal ends up marginal
    #[rstest]
    fn test_dispatch_rank_order(capacities: SourceCapacities, merit_order: PriorityTable) {
        let dispatch = dispatch_hour(100.0, &capacities, &merit_order).unwrap();

        let expected = [
            (Source::Biomass, 0.0),
            (Source::Coal, 35.0),
            (Source::Gas, 0.0),
            (Source::Hydro, 5.0),
            (Source::Nuclear, 50.0),
            (Source::Oil, 0.0),
            (Source::Others, 0.0),
            (Source::Solar, 10.0),
            (Source::Wind, 0.0),
        ];
        assert_eq!(dispatch.production, IndexMap::from(expected));
        assert!(!dispatch.unmet);
    }

    #[rstest]
    fn test_dispatch_zero_consumption(capacities: SourceCapacities, merit_order: PriorityTable) {
        let dispatch = dispatch_hour(0.0, &capacities, &merit_order).unwrap();
        for &production in dispatch.production.values() {
            assert_eq!(production, 0.0);
        }
        assert!(!dispatch.unmet);
    }

    /// When capacity is insufficient, every source runs in full and the
    /// shortfall is reported rather than assigned
    #[rstest]
    fn test_dispatch_shortfall(capacities: SourceCapacities, merit_order: PriorityTable) {
        let total_capacity: f64 = capacities.values().sum();
        let dispatch = dispatch_hour(total_capacity + 50.0, &capacities, &merit_order).unwrap();

        assert_eq!(dispatch.production, capacities);
        assert!(dispatch.unmet);
    }

    /// A must-run rank is dispatched in full even when it overshoots demand
    #[rstest]
    fn test_dispatch_must_run_overshoot(capacities: SourceCapacities, merit_order: PriorityTable) {
        let dispatch = dispatch_hour(10.0, &capacities, &merit_order).unwrap();

        assert_eq!(dispatch.production[&Source::Solar], 10.0);
        assert_eq!(dispatch.production[&Source::Hydro], 5.0);
        let total: f64 = dispatch.production.values().sum();
        assert_approx_eq!(f64, total, 15.0);
        assert!(!dispatch.unmet);
    }

    /// Conservation: production matches the smaller of consumption and total
    /// capacity (for demand above the must-run aggregate)
    #[rstest]
    #[case(15.0)]
    #[case(42.5)]
    #[case(100.0)]
    #[case(265.0)]
    #[case(1000.0)]
    fn test_dispatch_conservation(
        capacities: SourceCapacities,
        merit_order: PriorityTable,
        #[case] consumption: f64,
    ) {
        let total_capacity: f64 = capacities.values().sum();
        let dispatch = dispatch_hour(consumption, &capacities, &merit_order).unwrap();

        let total: f64 = dispatch.production.values().sum();
        assert_approx_eq!(f64, total, consumption.min(total_capacity));
        assert_eq!(dispatch.unmet, consumption > total_capacity);
    }

    /// No source ever produces more than its capacity, and at most one is
    /// partially dispatched
    #[rstest]
    #[case(15.0)]
    #[case(42.5)]
    #[case(100.0)]
    #[case(265.0)]
    fn test_dispatch_capacity_ceiling(
        capacities: SourceCapacities,
        merit_order: PriorityTable,
        #[case] consumption: f64,
    ) {
        let dispatch = dispatch_hour(consumption, &capacities, &merit_order).unwrap();

        let mut marginal = 0;
        for (source, &production) in &dispatch.production {
            let capacity = capacities[source];
            assert!(production <= capacity);
            if production > 0.0 && production < capacity {
                marginal += 1;
            }
        }
        assert!(marginal <= 1);
    }

    /// Once a rank covers demand, all lower-priority ranks receive zero
    #[rstest]
    fn test_dispatch_priority_respected(capacities: SourceCapacities, merit_order: PriorityTable) {
        // renewables (15) + nuclear cover 40, so coal, gas and oil stay idle
        let dispatch = dispatch_hour(40.0, &capacities, &merit_order).unwrap();

        assert_approx_eq!(f64, dispatch.production[&Source::Nuclear], 25.0);
        assert_eq!(dispatch.production[&Source::Coal], 0.0);
        assert_eq!(dispatch.production[&Source::Gas], 0.0);
        assert_eq!(dispatch.production[&Source::Oil], 0.0);
    }

    /// The function is pure: identical inputs give identical outputs
    #[rstest]
    fn test_dispatch_deterministic(capacities: SourceCapacities, merit_order: PriorityTable) {
        let first = dispatch_hour(100.0, &capacities, &merit_order).unwrap();
        let second = dispatch_hour(100.0, &capacities, &merit_order).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_dispatch_negative_consumption(
        capacities: SourceCapacities,
        merit_order: PriorityTable,
    ) {
        assert_split_error!(
            dispatch_hour(-1.0, &capacities, &merit_order),
            SplitError::InvalidInput(_)
        );
    }

    #[rstest]
    fn test_dispatch_negative_capacity(
        mut capacities: SourceCapacities,
        merit_order: PriorityTable,
    ) {
        capacities[&Source::Gas] = -5.0;
        assert_split_error!(
            dispatch_hour(100.0, &capacities, &merit_order),
            SplitError::InvalidInput(_)
        );
    }

    /// The merit order must cover exactly the sources with capacity data
    #[rstest]
    fn test_dispatch_source_mismatch(capacities: SourceCapacities) {
        let merit_order = PriorityTable::new(vec![vec![Source::Solar]]).unwrap();
        assert_split_error!(
            dispatch_hour(100.0, &capacities, &merit_order),
            SplitError::Configuration(_)
        );
    }
}
