//! Telemetry / KPIs: dispatch decisions and fleet state for analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::{DriverStatus, PersonId, TripId};
use crate::selection::SelectionReason;

/// One successful dispatch, recorded when the trip is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRecord {
    pub trip_id: TripId,
    pub driver_id: PersonId,
    pub passenger_id: PersonId,
    pub requested_at: DateTime<Utc>,
    #[serde(flatten)]
    pub reason: SelectionReason,
}

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetCounts {
    pub drivers_available: usize,
    pub drivers_unavailable: usize,
    pub trips_in_progress: usize,
    pub trips_completed: usize,
}

impl FleetCounts {
    pub fn add_driver(&mut self, status: DriverStatus) {
        match status {
            DriverStatus::Available => self.drivers_available += 1,
            DriverStatus::Unavailable => self.drivers_unavailable += 1,
        }
    }

    pub fn add_trip(&mut self, in_progress: bool) {
        if in_progress {
            self.trips_in_progress += 1;
        } else {
            self.trips_completed += 1;
        }
    }
}

/// Per-driver financial and rating figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSummary {
    pub driver_id: PersonId,
    pub name: String,
    pub status: DriverStatus,
    pub driven_trips: usize,
    pub average_rating: f64,
    pub total_revenue: f64,
    pub net_expenditures: f64,
}
