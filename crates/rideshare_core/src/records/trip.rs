use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::ids::{PersonId, TripId};
use crate::error::{DispatchError, Result};

/// Passenger rating of a completed trip, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DispatchError::invalid(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Fare charged for a completed trip, in currency units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Cost(f64);

impl Cost {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(DispatchError::invalid(format!(
                "cost must be a non-negative amount, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Completion data is present all together or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TripState {
    InProgress,
    Completed {
        end_time: DateTime<Utc>,
        cost: Cost,
        rating: Rating,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    id: TripId,
    driver: PersonId,
    passenger: PersonId,
    start_time: DateTime<Utc>,
    #[serde(flatten)]
    state: TripState,
}

impl Trip {
    /// A trip that has started and not yet ended.
    pub fn in_progress(
        id: TripId,
        driver: PersonId,
        passenger: PersonId,
        start_time: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            id,
            driver,
            passenger,
            start_time,
            state: TripState::InProgress,
        })
    }

    /// A trip loaded or built with its completion data already known.
    pub fn completed(
        id: TripId,
        driver: PersonId,
        passenger: PersonId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        cost: f64,
        rating: u8,
    ) -> Result<Self> {
        let mut trip = Self::in_progress(id, driver, passenger, start_time)?;
        trip.complete(end_time, cost, rating)?;
        Ok(trip)
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn driver(&self) -> PersonId {
        self.driver
    }

    pub fn passenger(&self) -> PersonId {
        self.passenger
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn state(&self) -> TripState {
        self.state
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.state, TripState::InProgress)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        match self.state {
            TripState::Completed { end_time, .. } => Some(end_time),
            TripState::InProgress => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self.state {
            TripState::Completed { cost, .. } => Some(cost.get()),
            TripState::InProgress => None,
        }
    }

    pub fn rating(&self) -> Option<u8> {
        match self.state {
            TripState::Completed { rating, .. } => Some(rating.get()),
            TripState::InProgress => None,
        }
    }

    /// Time from start to end; `None` while the trip is in progress.
    pub fn duration(&self) -> Option<Duration> {
        self.end_time().map(|end| end - self.start_time)
    }

    /// Moves an in-progress trip to completed. Leaves the trip untouched on error.
    pub(crate) fn complete(
        &mut self,
        end_time: DateTime<Utc>,
        cost: f64,
        rating: u8,
    ) -> Result<()> {
        if !self.is_in_progress() {
            return Err(DispatchError::invalid(format!(
                "trip {} is already completed",
                self.id
            )));
        }
        if end_time < self.start_time {
            return Err(DispatchError::invalid(format!(
                "trip {} cannot end before it starts",
                self.id
            )));
        }
        let cost = Cost::new(cost)?;
        let rating = Rating::new(rating)?;
        self.state = TripState::Completed {
            end_time,
            cost,
            rating,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_time;

    fn ids() -> (TripId, PersonId, PersonId) {
        (
            TripId::new(8).expect("trip id"),
            PersonId::new(54).expect("driver id"),
            PersonId::new(1).expect("passenger id"),
        )
    }

    #[test]
    fn in_progress_trip_has_no_completion_data() {
        let (id, driver, passenger) = ids();
        let trip = Trip::in_progress(id, driver, passenger, test_time("2016-08-08T00:00:00Z"))
            .expect("trip");
        assert!(trip.is_in_progress());
        assert_eq!(trip.end_time(), None);
        assert_eq!(trip.cost(), None);
        assert_eq!(trip.rating(), None);
        assert_eq!(trip.duration(), None);
    }

    #[test]
    fn completed_trip_exposes_all_fields() {
        let (id, driver, passenger) = ids();
        let trip = Trip::completed(
            id,
            driver,
            passenger,
            test_time("2016-08-08T20:08:00Z"),
            test_time("2016-08-08T20:20:14Z"),
            14.50,
            5,
        )
        .expect("trip");
        assert!(!trip.is_in_progress());
        assert_eq!(trip.cost(), Some(14.50));
        assert_eq!(trip.rating(), Some(5));
        assert_eq!(trip.duration(), Some(Duration::seconds(12 * 60 + 14)));
    }

    #[test]
    fn completion_validates_every_field() {
        let (id, driver, passenger) = ids();
        let start = test_time("2016-08-08T00:00:00Z");
        let later = test_time("2016-08-09T00:00:00Z");
        let earlier = test_time("2016-08-07T00:00:00Z");

        assert!(Trip::completed(id, driver, passenger, start, later, 10.0, 0).is_err());
        assert!(Trip::completed(id, driver, passenger, start, later, 10.0, 6).is_err());
        assert!(Trip::completed(id, driver, passenger, start, later, -1.0, 3).is_err());
        assert!(Trip::completed(id, driver, passenger, start, later, f64::NAN, 3).is_err());
        assert!(Trip::completed(id, driver, passenger, start, earlier, 10.0, 3).is_err());
    }

    #[test]
    fn completed_trip_is_never_mutated_again() {
        let (id, driver, passenger) = ids();
        let start = test_time("2016-08-08T00:00:00Z");
        let end = test_time("2016-08-09T00:00:00Z");
        let mut trip = Trip::completed(id, driver, passenger, start, end, 10.0, 4).expect("trip");

        let err = trip.complete(end, 99.0, 1).expect_err("second completion");
        assert!(err.message().contains("already completed"));
        assert_eq!(trip.cost(), Some(10.0));
        assert_eq!(trip.rating(), Some(4));
    }

    #[test]
    fn loaded_trip_may_share_driver_and_passenger_identity() {
        let (id, driver, _) = ids();
        let trip = Trip::completed(
            id,
            driver,
            driver,
            test_time("2016-08-08T00:00:00Z"),
            test_time("2016-08-08T00:10:00Z"),
            8.0,
            3,
        )
        .expect("trip");
        assert_eq!(trip.driver(), trip.passenger());
    }

    #[test]
    fn state_reflects_completion() {
        let (id, driver, passenger) = ids();
        let trip = Trip::completed(
            id,
            driver,
            passenger,
            test_time("2016-08-08T00:00:00Z"),
            test_time("2016-08-08T00:10:00Z"),
            8.0,
            3,
        )
        .expect("trip");
        match trip.state() {
            TripState::Completed { cost, rating, .. } => {
                assert_eq!(cost.get(), 8.0);
                assert_eq!(rating.get(), 3);
            }
            TripState::InProgress => panic!("expected completed state"),
        }
    }
}
