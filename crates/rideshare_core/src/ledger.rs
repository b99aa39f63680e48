//! The authoritative collection of every trip in a run.

use std::collections::HashMap;

use crate::error::{DispatchError, Result};
use crate::records::{PersonId, Trip, TripId};

/// Trips in insertion order, indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct TripLedger {
    trips: Vec<Trip>,
    index: HashMap<TripId, usize>,
    max_id: u32,
}

impl TripLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, trip: Trip) -> Result<()> {
        let id = trip.id();
        if self.index.contains_key(&id) {
            return Err(DispatchError::invalid(format!("duplicate trip id {id}")));
        }
        self.max_id = self.max_id.max(id.get());
        self.index.insert(id, self.trips.len());
        self.trips.push(trip);
        Ok(())
    }

    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.index.get(&id).map(|&idx| &self.trips[idx])
    }

    pub(crate) fn get_mut(&mut self, id: TripId) -> Option<&mut Trip> {
        self.index.get(&id).map(|&idx| &mut self.trips[idx])
    }

    pub fn contains(&self, id: TripId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Trips where `person` rode as the passenger, in ledger order.
    pub fn trips_for_passenger(&self, person: PersonId) -> impl Iterator<Item = &Trip> + '_ {
        self.trips.iter().filter(move |trip| trip.passenger() == person)
    }

    /// One past the largest ID seen, so new trips never collide with loaded ones.
    pub fn next_id(&self) -> Result<TripId> {
        let next = self
            .max_id
            .checked_add(1)
            .ok_or_else(|| DispatchError::invalid("trip id space exhausted"))?;
        TripId::new(next)
    }
}

impl<'a> IntoIterator for &'a TripLedger {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
