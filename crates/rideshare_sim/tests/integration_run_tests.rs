use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rideshare_core::{Clock, DispatchConfig, Dispatcher, ManualClock};
use rideshare_records::{load_records, RecordPaths};
use rideshare_sim::{run, RunPlan};

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2018-09-01T00:00:00Z")
        .expect("start")
        .with_timezone(&Utc)
}

fn sample_dispatcher() -> (Dispatcher, Arc<ManualClock>) {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../rideshare_records/tests/data");
    let records = load_records(&RecordPaths::in_dir(data)).expect("records");
    let clock = Arc::new(ManualClock::new(start()));
    let dispatcher = Dispatcher::with_clock(records, DispatchConfig::default(), Arc::clone(&clock))
        .expect("dispatcher");
    (dispatcher, clock)
}

#[test]
fn requests_beyond_fleet_size_are_rejected() {
    let (mut dispatcher, clock) = sample_dispatcher();
    let plan = RunPlan {
        requests: vec![2, 4, 1, 6],
        ..RunPlan::default()
    };

    let summary = run(&mut dispatcher, &clock, &plan);

    assert_eq!(summary.requested, 4);
    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.completed, 0);
    assert_eq!(summary.rejections.len(), 1);
    assert_eq!(summary.rejections[0].passenger_id, 6);
    assert_eq!(summary.rejections[0].reason, "no drivers available");
    let drivers: Vec<u32> = summary.dispatches.iter().map(|d| d.driver_id.get()).collect();
    assert_eq!(drivers, vec![3, 8, 5]);
    assert_eq!(summary.fleet.drivers_available, 0);
}

#[test]
fn completing_trips_keeps_fleet_in_rotation() {
    let (mut dispatcher, clock) = sample_dispatcher();
    let plan = RunPlan {
        requests: vec![1, 2, 4, 6, 7, 1, 2],
        complete_trips: true,
        interval: Duration::minutes(90),
        seed: 11,
    };

    let summary = run(&mut dispatcher, &clock, &plan);

    assert_eq!(summary.dispatched, 7);
    assert_eq!(summary.completed, 7);
    assert!(summary.rejections.is_empty());
    assert_eq!(summary.fleet.trips_completed, 4 + 7);
    assert_eq!(clock.now(), start() + Duration::minutes(90 * 7));
    for driver in &summary.drivers {
        assert!(driver.average_rating == 0.0 || (1.0..=5.0).contains(&driver.average_rating));
    }
}

#[test]
fn summary_serializes_to_json() {
    let (mut dispatcher, clock) = sample_dispatcher();
    let plan = RunPlan {
        requests: vec![2],
        ..RunPlan::default()
    };
    let summary = run(&mut dispatcher, &clock, &plan);

    let json = serde_json::to_value(&summary).expect("json");
    assert_eq!(json["dispatched"], 1);
    assert_eq!(json["dispatches"][0]["driver_id"], 3);
    assert_eq!(json["dispatches"][0]["reason"], "never_driven");
    assert_eq!(json["drivers"][1]["status"], "UNAVAILABLE");
}
