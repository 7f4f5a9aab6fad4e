//! Scenario 8: end-to-end search over the fixture library and pattern
//! catalog, smoke-tested at a couple of depths without panicking.

use std::time::Duration;

use opmodel_repair::fixtures::Fixtures;
use opmodel_repair::property::{Interpretation, Property};
use opmodel_repair::{search, PatternLibrary, SearchOutcome};

#[test]
fn search_at_depth_zero_reports_the_unmodified_violation() {
    let operator = Fixtures::ex_cdm();
    let machine = Fixtures::ex_linear();
    let property = Property::new(Fixtures::prop_five(), Interpretation::Nop, [5]);
    let patterns = PatternLibrary::init();

    let mut seen = Vec::new();
    let outcome = search(
        &operator,
        &machine,
        &property,
        &patterns,
        0,
        16,
        Duration::from_millis(500),
        |v| seen.push(v),
    );

    match outcome {
        SearchOutcome::NotFound { tried } => assert_eq!(tried, 1),
        SearchOutcome::Success { .. } => {
            // ex_cdm/ex_linear do not necessarily violate prop_five at
            // depth zero; either verdict is acceptable here as long as it
            // is reported without panicking and with a consistent count.
            assert_eq!(seen.len(), 1);
        }
    }
}

#[test]
fn search_at_depth_two_terminates_and_reports_deterministically() {
    let operator = Fixtures::ex_cycle(4);
    let machine = Fixtures::ex_cycle(4);
    let property = Property::new(Fixtures::prop_five(), Interpretation::Nop, [5]);
    let patterns = PatternLibrary::init();

    let mut seen = Vec::new();
    let outcome = search(
        &operator,
        &machine,
        &property,
        &patterns,
        2,
        8,
        Duration::from_millis(500),
        |v| seen.push(v),
    );

    match outcome {
        SearchOutcome::Success { violators, .. } => assert_eq!(violators, seen.len()),
        SearchOutcome::NotFound { .. } => assert!(seen.is_empty()),
    }
    for violator in &seen {
        assert_eq!(violator.applied.len(), 2);
    }
}
