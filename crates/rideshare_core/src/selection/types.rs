use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::PersonId;

/// An available driver as seen by a selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCandidate {
    pub driver_id: PersonId,
    /// Start time of the driver's most recent driven trip; `None` if never driven.
    pub last_trip_start: Option<DateTime<Utc>>,
}

/// Why a policy picked the driver it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SelectionReason {
    NeverDriven,
    LeastRecentlyDriven { last_trip_start: DateTime<Utc> },
    FirstAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub driver_id: PersonId,
    pub reason: SelectionReason,
}
