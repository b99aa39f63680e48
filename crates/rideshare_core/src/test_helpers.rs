//! Test helpers for common test setup and utilities.
//!
//! Shared across unit tests, integration tests and the sibling crates' tests.

use chrono::{DateTime, Utc};

use crate::dispatcher::Records;
use crate::records::{Driver, DriverStatus, Passenger, PersonId, Trip, TripId};

/// A well-formed VIN used wherever the vehicle does not matter.
pub const TEST_VIN: &str = "1C9EVBRM0YBC564DZ";

/// Parse an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if `rfc3339` is not a valid timestamp.
pub fn test_time(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("test timestamp should be RFC 3339")
        .with_timezone(&Utc)
}

/// A distinct valid VIN per driver, e.g. `TESTVIN0000000042`.
pub fn test_vin(n: u32) -> String {
    format!("TESTVIN{n:010}")
}

/// Builder for small, linked record sets.
///
/// Drivers and passengers are kept in call order, which is the dispatcher's
/// collection order. Trips are linked into both histories as they are added.
///
/// # Panics
///
/// Every method panics on invalid input; it is meant for fixtures only.
#[derive(Debug, Default)]
pub struct RecordsBuilder {
    records: Records,
}

impl RecordsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passenger(mut self, id: u32, name: &str) -> Self {
        let passenger = Passenger::new(id, name, "555-0100").expect("fixture passenger");
        self.records.passengers.push(passenger);
        self
    }

    pub fn driver(mut self, id: u32, name: &str, status: DriverStatus) -> Self {
        let driver = Driver::new(id, name, &test_vin(id), status).expect("fixture driver");
        self.records.drivers.push(driver);
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn completed_trip(
        self,
        id: u32,
        driver: u32,
        passenger: u32,
        start: &str,
        end: &str,
        cost: f64,
        rating: u8,
    ) -> Self {
        let trip = Trip::completed(
            TripId::new(id).expect("fixture trip id"),
            PersonId::new(driver).expect("fixture driver id"),
            PersonId::new(passenger).expect("fixture passenger id"),
            test_time(start),
            test_time(end),
            cost,
            rating,
        )
        .expect("fixture trip");
        self.trip(trip)
    }

    pub fn in_progress_trip(self, id: u32, driver: u32, passenger: u32, start: &str) -> Self {
        let trip = Trip::in_progress(
            TripId::new(id).expect("fixture trip id"),
            PersonId::new(driver).expect("fixture driver id"),
            PersonId::new(passenger).expect("fixture passenger id"),
            test_time(start),
        )
        .expect("fixture trip");
        self.trip(trip)
    }

    fn trip(mut self, trip: Trip) -> Self {
        if let Some(driver) = self.records.drivers.iter_mut().find(|d| d.id() == trip.driver()) {
            driver.add_driven_trip(&trip).expect("fixture driven trip");
        }
        if let Some(passenger) = self
            .records
            .passengers
            .iter_mut()
            .find(|p| p.id() == trip.passenger())
        {
            passenger.add_trip(&trip).expect("fixture passenger trip");
        }
        self.records.trips.push(trip);
        self
    }

    pub fn build(self) -> Records {
        self.records
    }
}
