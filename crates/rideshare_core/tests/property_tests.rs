//! Property-based tests for driver aggregate invariants.

use proptest::prelude::*;
use rideshare_core::records::{Driver, DriverStatus, PersonId, Trip, TripId};
use rideshare_core::test_helpers::{test_time, TEST_VIN};
use rideshare_core::{FareSplit, TripLedger};

/// `(cost_cents, rating)`; `None` marks an in-progress trip.
fn history() -> impl Strategy<Value = Vec<Option<(u32, u8)>>> {
    prop::collection::vec(prop::option::of((0u32..20_000, 1u8..=5)), 0..24)
}

fn build(history: &[Option<(u32, u8)>]) -> (Driver, TripLedger) {
    let mut driver = Driver::new(54, "Prop Driver", TEST_VIN, DriverStatus::Available).unwrap();
    let mut ledger = TripLedger::new();
    let start = test_time("2018-01-01T00:00:00Z");
    let end = test_time("2018-01-01T00:30:00Z");
    let driver_id = PersonId::new(54).unwrap();
    let passenger_id = PersonId::new(1).unwrap();

    for (idx, entry) in history.iter().enumerate() {
        let id = TripId::new(idx as u32 + 1).unwrap();
        let trip = match entry {
            Some((cents, rating)) => Trip::completed(
                id,
                driver_id,
                passenger_id,
                start,
                end,
                f64::from(*cents) / 100.0,
                *rating,
            ),
            None => Trip::in_progress(id, driver_id, passenger_id, start),
        }
        .unwrap();
        driver.add_driven_trip(&trip).unwrap();
        ledger.insert(trip).unwrap();
    }
    (driver, ledger)
}

proptest! {
    /// Property: average rating is 0 with no ratings, otherwise within 1.0..=5.0
    #[test]
    fn average_rating_stays_in_range(history in history()) {
        let (driver, ledger) = build(&history);
        let average = driver.average_rating(&ledger);
        if history.iter().all(Option::is_none) {
            prop_assert_eq!(average, 0.0);
        } else {
            prop_assert!((1.0..=5.0).contains(&average));
        }
    }

    /// Property: appending an in-progress trip changes neither rating nor revenue
    #[test]
    fn in_progress_trip_is_invisible_to_aggregates(history in history()) {
        let (driver, ledger) = build(&history);
        let mut extended = history.clone();
        extended.push(None);
        let (driver_ext, ledger_ext) = build(&extended);

        prop_assert_eq!(driver.average_rating(&ledger), driver_ext.average_rating(&ledger_ext));
        prop_assert_eq!(driver.total_revenue(&ledger), driver_ext.total_revenue(&ledger_ext));
    }

    /// Property: revenue equals the fee formula over completed costs only
    #[test]
    fn revenue_matches_formula(history in history()) {
        let (driver, ledger) = build(&history);
        let expected: f64 = history
            .iter()
            .flatten()
            .map(|(cents, _)| f64::from(*cents) / 100.0 - FareSplit::STANDARD.platform_fee)
            .sum::<f64>()
            * FareSplit::STANDARD.driver_share;
        prop_assert!((driver.total_revenue(&ledger) - expected).abs() < 1e-6);
    }
}
