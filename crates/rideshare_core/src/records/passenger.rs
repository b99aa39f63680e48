use chrono::Duration;

use super::ids::{PersonId, TripId};
use super::trip::Trip;
use crate::error::{DispatchError, Result};
use crate::ledger::TripLedger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    id: PersonId,
    name: String,
    phone: String,
    /// Trips taken, in request order.
    trips: Vec<TripId>,
}

impl Passenger {
    pub fn new(id: u32, name: impl Into<String>, phone: impl Into<String>) -> Result<Self> {
        let id = PersonId::new(id)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DispatchError::invalid(format!("passenger {id}: name cannot be empty")));
        }
        Ok(Self {
            id,
            name,
            phone: phone.into(),
            trips: Vec::new(),
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn trips(&self) -> &[TripId] {
        &self.trips
    }

    /// Records a trip taken by this passenger; rejects foreign or repeated trips.
    pub fn add_trip(&mut self, trip: &Trip) -> Result<()> {
        if trip.passenger() != self.id {
            return Err(DispatchError::invalid(format!(
                "trip {} belongs to passenger {}, not {}",
                trip.id(),
                trip.passenger(),
                self.id
            )));
        }
        if self.trips.contains(&trip.id()) {
            return Err(DispatchError::invalid(format!(
                "trip {} is already recorded for passenger {}",
                trip.id(),
                self.id
            )));
        }
        self.record_trip(trip.id());
        Ok(())
    }

    pub(crate) fn record_trip(&mut self, trip_id: TripId) {
        self.trips.push(trip_id);
    }

    fn taken<'a>(&'a self, ledger: &'a TripLedger) -> impl Iterator<Item = &'a Trip> + 'a {
        self.trips.iter().filter_map(|id| ledger.get(*id))
    }

    /// Sum of fares over completed trips.
    pub fn total_spent(&self, ledger: &TripLedger) -> f64 {
        self.taken(ledger).filter_map(Trip::cost).sum()
    }

    /// Total riding time over completed trips.
    pub fn total_time_spent(&self, ledger: &TripLedger) -> Duration {
        self.taken(ledger)
            .filter_map(Trip::duration)
            .fold(Duration::zero(), |total, duration| total + duration)
    }
}
