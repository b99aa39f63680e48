//! Replays a sequence of trip requests against a dispatcher.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rideshare_core::telemetry::{DispatchRecord, DriverSummary, FleetCounts};
use rideshare_core::{Dispatcher, ManualClock, Passenger};
use serde::Serialize;
use tracing::{info, warn};

/// What to replay and how trips end.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Passenger IDs in request order.
    pub requests: Vec<u32>,
    /// Complete each trip right after dispatch with a sampled fare and rating.
    pub complete_trips: bool,
    /// Simulated time between consecutive requests.
    pub interval: Duration,
    /// Seed for RNG (for reproducibility).
    pub seed: u64,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            complete_trips: false,
            interval: Duration::minutes(5),
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub passenger_id: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub requested: usize,
    pub dispatched: usize,
    pub completed: usize,
    pub rejections: Vec<Rejection>,
    pub dispatches: Vec<DispatchRecord>,
    pub fleet: FleetCounts,
    pub drivers: Vec<DriverSummary>,
}

/// Explicit IDs first, then `random` passengers drawn uniformly with `seed`.
pub fn plan_requests(
    explicit: &[u32],
    random: usize,
    passengers: &[Passenger],
    seed: u64,
) -> Vec<u32> {
    let mut requests = explicit.to_vec();
    if passengers.is_empty() {
        return requests;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    requests.extend((0..random).map(|_| {
        let idx = rng.gen_range(0..passengers.len());
        passengers[idx].id().get()
    }));
    requests
}

pub fn run(dispatcher: &mut Dispatcher, clock: &ManualClock, plan: &RunPlan) -> RunSummary {
    let mut rng = StdRng::seed_from_u64(plan.seed);
    let mut rejections = Vec::new();
    let mut dispatched = 0;
    let mut completed = 0;
    let log_start = dispatcher.dispatch_log().len();

    for &passenger_id in &plan.requests {
        match dispatcher.request_trip(passenger_id) {
            Ok(trip) => {
                dispatched += 1;
                if plan.complete_trips {
                    let end = trip.start_time() + Duration::minutes(rng.gen_range(5..=60));
                    let cost = f64::from(rng.gen_range(500u32..=6_000)) / 100.0;
                    let rating = rng.gen_range(1..=5);
                    match dispatcher.complete_trip(trip.id().get(), end, cost, rating) {
                        Ok(_) => completed += 1,
                        Err(err) => warn!(trip = %trip.id(), error = %err, "completion failed"),
                    }
                }
            }
            Err(err) => {
                warn!(passenger = passenger_id, error = %err, "request rejected");
                rejections.push(Rejection {
                    passenger_id,
                    reason: err.message().to_string(),
                });
            }
        }
        clock.advance(plan.interval);
    }

    info!(
        requested = plan.requests.len(),
        dispatched,
        completed,
        rejected = rejections.len(),
        "run finished"
    );

    RunSummary {
        requested: plan.requests.len(),
        dispatched,
        completed,
        rejections,
        dispatches: dispatcher.dispatch_log()[log_start..].to_vec(),
        fleet: dispatcher.fleet_counts(),
        drivers: dispatcher.driver_summaries(),
    }
}
