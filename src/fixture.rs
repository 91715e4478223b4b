//! Fixtures for tests

use crate::priority::PriorityTable;
use crate::source::{Source, SourceCapacities};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Assert that the result failed with the given [`SplitError`] variant
macro_rules! assert_split_error {
    ($result:expr, $variant:pat) => {
        let err = $result.unwrap_err();
        let err = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<crate::error::SplitError>())
            .expect("expected a SplitError");
        assert!(matches!(err, $variant), "unexpected error: {err}");
    };
}
pub(crate) use assert_split_error;

/// Capacities with ample fossil headroom and a small must-run fleet
#[fixture]
pub fn capacities() -> SourceCapacities {
    SourceCapacities::from([
        (Source::Biomass, 0.0),
        (Source::Coal, 100.0),
        (Source::Gas, 100.0),
        (Source::Hydro, 5.0),
        (Source::Nuclear, 50.0),
        (Source::Oil, 100.0),
        (Source::Others, 0.0),
        (Source::Solar, 10.0),
        (Source::Wind, 0.0),
    ])
}

/// The canonical merit order
#[fixture]
pub fn merit_order() -> PriorityTable {
    PriorityTable::default()
}
