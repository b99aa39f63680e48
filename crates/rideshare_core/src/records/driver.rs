use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PersonId, TripId, Vin};
use super::trip::Trip;
use crate::error::{DispatchError, Result};
use crate::ledger::TripLedger;
use crate::pricing::FareSplit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Available,
    Unavailable,
}

impl FromStr for DriverStatus {
    type Err = DispatchError;

    /// Accepts `AVAILABLE` / `UNAVAILABLE` in any case.
    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(DriverStatus::Available),
            "UNAVAILABLE" => Ok(DriverStatus::Unavailable),
            _ => Err(DispatchError::invalid(format!("unknown driver status {raw:?}"))),
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverStatus::Available => f.write_str("AVAILABLE"),
            DriverStatus::Unavailable => f.write_str("UNAVAILABLE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    id: PersonId,
    name: String,
    vehicle_id: Vin,
    status: DriverStatus,
    /// Trips driven, in the order they were recorded.
    driven_trips: Vec<TripId>,
}

impl Driver {
    /// Builds a driver with an empty trip history.
    ///
    /// Fails when `id` is zero, `name` is blank, or `vehicle_id` is not a
    /// 17-character alphanumeric VIN.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        vehicle_id: &str,
        status: DriverStatus,
    ) -> Result<Self> {
        let id = PersonId::new(id)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DispatchError::invalid(format!("driver {id}: name cannot be empty")));
        }
        let vehicle_id = Vin::parse(vehicle_id)?;
        Ok(Self {
            id,
            name,
            vehicle_id,
            status,
            driven_trips: Vec::new(),
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vehicle_id(&self) -> &Vin {
        &self.vehicle_id
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }

    pub fn driven_trips(&self) -> &[TripId] {
        &self.driven_trips
    }

    /// Records a trip this driver drove.
    ///
    /// Fails if the trip names a different driver or is already recorded.
    pub fn add_driven_trip(&mut self, trip: &Trip) -> Result<()> {
        if trip.driver() != self.id {
            return Err(DispatchError::invalid(format!(
                "trip {} is driven by {}, not driver {}",
                trip.id(),
                trip.driver(),
                self.id
            )));
        }
        if self.driven_trips.contains(&trip.id()) {
            return Err(DispatchError::invalid(format!(
                "trip {} is already recorded for driver {}",
                trip.id(),
                self.id
            )));
        }
        self.record_driven_trip(trip.id());
        Ok(())
    }

    pub(crate) fn record_driven_trip(&mut self, trip_id: TripId) {
        self.driven_trips.push(trip_id);
    }

    pub(crate) fn set_status(&mut self, status: DriverStatus) {
        self.status = status;
    }

    fn driven<'a>(&'a self, ledger: &'a TripLedger) -> impl Iterator<Item = &'a Trip> + 'a {
        self.driven_trips.iter().filter_map(|id| ledger.get(*id))
    }

    /// Start time of the most recent trip this driver drove, if any.
    pub fn last_trip_start(&self, ledger: &TripLedger) -> Option<DateTime<Utc>> {
        self.driven(ledger).map(Trip::start_time).max()
    }

    /// Mean rating over rated trips; `0.0` when nothing has been rated yet.
    pub fn average_rating(&self, ledger: &TripLedger) -> f64 {
        let (sum, count) = self
            .driven(ledger)
            .filter_map(Trip::rating)
            .fold((0u32, 0u32), |(sum, count), rating| {
                (sum + u32::from(rating), count + 1)
            });
        if count == 0 {
            return 0.0;
        }
        f64::from(sum) / f64::from(count)
    }

    /// Driver earnings under the standard platform fee and revenue share.
    pub fn total_revenue(&self, ledger: &TripLedger) -> f64 {
        self.total_revenue_with(ledger, &FareSplit::STANDARD)
    }

    /// Driver earnings under `split`. In-progress trips contribute nothing.
    pub fn total_revenue_with(&self, ledger: &TripLedger, split: &FareSplit) -> f64 {
        split.driver_payout(self.driven(ledger).filter_map(Trip::cost))
    }

    /// What this person paid while riding as a passenger.
    pub fn total_spent(&self, ledger: &TripLedger) -> f64 {
        ledger
            .trips_for_passenger(self.id)
            .filter_map(Trip::cost)
            .sum()
    }

    pub fn net_expenditures(&self, ledger: &TripLedger) -> f64 {
        self.net_expenditures_with(ledger, &FareSplit::STANDARD)
    }

    pub fn net_expenditures_with(&self, ledger: &TripLedger, split: &FareSplit) -> f64 {
        self.total_spent(ledger) - self.total_revenue_with(ledger, split)
    }
}
