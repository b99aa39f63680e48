use std::sync::Arc;

use rideshare_core::test_helpers::{test_time, RecordsBuilder};
use rideshare_core::{DispatchConfig, Dispatcher, DriverStatus, ManualClock, Records};

/// Clock start for dispatcher fixtures; later than every seeded trip.
pub const FIXTURE_NOW: &str = "2018-09-01T00:00:00Z";

/// Eight passengers and four drivers.
///
/// Driver collection order and history:
/// - 2 `Driver2`: unavailable, trip 5 still in progress
/// - 3 `User3`: available, never driven
/// - 5 `Driver5`: available, last trip 2018-07-01
/// - 8 `Driver8`: available, last trip 2018-01-10 (also passenger 8)
pub fn standard_fleet() -> Records {
    RecordsBuilder::new()
        .passenger(1, "User1")
        .passenger(2, "User2")
        .passenger(3, "User3")
        .passenger(4, "User4")
        .passenger(5, "User5")
        .passenger(6, "User6")
        .passenger(7, "User7")
        .passenger(8, "Driver8")
        .driver(2, "Driver2", DriverStatus::Unavailable)
        .driver(3, "User3", DriverStatus::Available)
        .driver(5, "Driver5", DriverStatus::Available)
        .driver(8, "Driver8", DriverStatus::Available)
        .completed_trip(1, 2, 1, "2018-05-25T11:52:40Z", "2018-05-25T12:25:00Z", 10.0, 5)
        .completed_trip(2, 8, 4, "2018-01-10T09:00:00Z", "2018-01-10T09:30:00Z", 20.0, 4)
        .completed_trip(3, 5, 7, "2018-06-01T08:00:00Z", "2018-06-01T08:20:00Z", 15.0, 3)
        .completed_trip(4, 5, 6, "2018-07-01T08:00:00Z", "2018-07-01T08:45:00Z", 30.0, 5)
        .in_progress_trip(5, 2, 3, "2018-08-01T10:00:00Z")
        .build()
}

/// A dispatcher over [`standard_fleet`] on a manual clock set to [`FIXTURE_NOW`].
pub fn fixture_dispatcher() -> (Dispatcher, Arc<ManualClock>) {
    fixture_dispatcher_with(DispatchConfig::default())
}

pub fn fixture_dispatcher_with(config: DispatchConfig) -> (Dispatcher, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(test_time(FIXTURE_NOW)));
    let dispatcher = Dispatcher::with_clock(standard_fleet(), config, Arc::clone(&clock))
        .expect("fixture dispatcher");
    (dispatcher, clock)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}
