//! The stateful coordinator: lookups, dispatch and trip completion.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};
use crate::ledger::TripLedger;
use crate::records::{Driver, DriverStatus, Passenger, PersonId, Trip, TripId};
use crate::selection::{DriverCandidate, DriverSelection};
use crate::telemetry::{DispatchRecord, DriverSummary, FleetCounts};

/// Already-validated records handed over by a loader.
///
/// Trips may or may not already appear in their driver's and passenger's
/// histories; [`Dispatcher::new`] links whatever is missing.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub drivers: Vec<Driver>,
    pub passengers: Vec<Passenger>,
    pub trips: Vec<Trip>,
}

pub struct Dispatcher {
    drivers: Vec<Driver>,
    driver_index: HashMap<PersonId, usize>,
    passengers: Vec<Passenger>,
    passenger_index: HashMap<PersonId, usize>,
    ledger: TripLedger,
    config: DispatchConfig,
    selection: Box<dyn DriverSelection>,
    clock: Box<dyn Clock>,
    dispatch_log: Vec<DispatchRecord>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("drivers", &self.drivers.len())
            .field("passengers", &self.passengers.len())
            .field("trips", &self.ledger.len())
            .field("selection", &self.selection.name())
            .finish()
    }
}

fn index_by_id<T>(
    items: &[T],
    id: impl Fn(&T) -> PersonId,
    role: &str,
) -> Result<HashMap<PersonId, usize>> {
    let mut index = HashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if index.insert(id(item), idx).is_some() {
            return Err(DispatchError::invalid(format!("duplicate {role} id {}", id(item))));
        }
    }
    Ok(index)
}

fn checked_person_id(raw: u32, role: &str) -> Result<PersonId> {
    PersonId::new(raw)
        .map_err(|_| DispatchError::invalid(format!("{role} id must be positive, got {raw}")))
}

impl Dispatcher {
    /// Builds a dispatcher on the wall clock.
    pub fn new(records: Records, config: DispatchConfig) -> Result<Self> {
        Self::with_clock(records, config, SystemClock)
    }

    pub fn with_clock(
        records: Records,
        config: DispatchConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let Records {
            mut drivers,
            mut passengers,
            trips,
        } = records;

        let driver_index = index_by_id(&drivers, Driver::id, "driver")?;
        let passenger_index = index_by_id(&passengers, Passenger::id, "passenger")?;

        let mut ledger = TripLedger::new();
        for trip in trips {
            let driver_idx = *driver_index.get(&trip.driver()).ok_or_else(|| {
                DispatchError::invalid(format!(
                    "trip {} references unknown driver {}",
                    trip.id(),
                    trip.driver()
                ))
            })?;
            let passenger_idx = *passenger_index.get(&trip.passenger()).ok_or_else(|| {
                DispatchError::invalid(format!(
                    "trip {} references unknown passenger {}",
                    trip.id(),
                    trip.passenger()
                ))
            })?;

            let driver = &mut drivers[driver_idx];
            if !driver.driven_trips().contains(&trip.id()) {
                driver.record_driven_trip(trip.id());
            }
            let passenger = &mut passengers[passenger_idx];
            if !passenger.trips().contains(&trip.id()) {
                passenger.record_trip(trip.id());
            }
            ledger.insert(trip)?;
        }

        for driver in &drivers {
            for trip_id in driver.driven_trips() {
                match ledger.get(*trip_id) {
                    Some(trip) if trip.driver() == driver.id() => {}
                    _ => {
                        return Err(DispatchError::invalid(format!(
                            "driver {} lists trip {trip_id} which it did not drive",
                            driver.id()
                        )))
                    }
                }
            }
        }
        for passenger in &passengers {
            for trip_id in passenger.trips() {
                match ledger.get(*trip_id) {
                    Some(trip) if trip.passenger() == passenger.id() => {}
                    _ => {
                        return Err(DispatchError::invalid(format!(
                            "passenger {} lists trip {trip_id} which they did not take",
                            passenger.id()
                        )))
                    }
                }
            }
        }

        info!(
            drivers = drivers.len(),
            passengers = passengers.len(),
            trips = ledger.len(),
            selection = ?config.selection,
            "dispatcher ready"
        );

        Ok(Self {
            drivers,
            driver_index,
            passengers,
            passenger_index,
            ledger,
            selection: config.selection.build(),
            config,
            clock: Box::new(clock),
            dispatch_log: Vec::new(),
        })
    }

    /// Replace the configured policy with a custom one.
    pub fn with_selection(mut self, selection: Box<dyn DriverSelection>) -> Self {
        self.selection = selection;
        self
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn trips(&self) -> &TripLedger {
        &self.ledger
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn dispatch_log(&self) -> &[DispatchRecord] {
        &self.dispatch_log
    }

    fn driver_slot(&self, raw: u32) -> Result<usize> {
        let id = checked_person_id(raw, "driver")?;
        self.driver_index
            .get(&id)
            .copied()
            .ok_or_else(|| DispatchError::invalid(format!("no driver with id {raw}")))
    }

    fn passenger_slot(&self, raw: u32) -> Result<usize> {
        let id = checked_person_id(raw, "passenger")?;
        self.passenger_index
            .get(&id)
            .copied()
            .ok_or_else(|| DispatchError::invalid(format!("no passenger with id {raw}")))
    }

    pub fn find_driver(&self, id: u32) -> Result<&Driver> {
        self.driver_slot(id).map(|idx| &self.drivers[idx])
    }

    pub fn find_passenger(&self, id: u32) -> Result<&Passenger> {
        self.passenger_slot(id).map(|idx| &self.passengers[idx])
    }

    pub fn find_trip(&self, id: u32) -> Result<&Trip> {
        let trip_id = TripId::new(id)?;
        self.ledger
            .get(trip_id)
            .ok_or_else(|| DispatchError::invalid(format!("no trip with id {id}")))
    }

    /// Assigns a driver to a new trip for `passenger_id`.
    ///
    /// Selection finishes before anything is mutated, so a failed request
    /// leaves drivers, passengers and the ledger exactly as they were.
    pub fn request_trip(&mut self, passenger_id: u32) -> Result<Trip> {
        let passenger_idx = self.passenger_slot(passenger_id)?;
        let passenger = self.passengers[passenger_idx].id();

        let candidates: Vec<DriverCandidate> = self
            .drivers
            .iter()
            .filter(|driver| driver.is_available())
            .map(|driver| DriverCandidate {
                driver_id: driver.id(),
                last_trip_start: driver.last_trip_start(&self.ledger),
            })
            .collect();
        if candidates.is_empty() {
            debug!(passenger = %passenger, "no drivers available");
            return Err(DispatchError::invalid("no drivers available"));
        }

        let selection = self
            .selection
            .select(passenger, &candidates)
            .ok_or_else(|| {
                DispatchError::invalid(format!(
                    "no eligible driver available for passenger {passenger}"
                ))
            })?;
        let offered = candidates.iter().any(|c| c.driver_id == selection.driver_id);
        if selection.driver_id == passenger || !offered {
            return Err(DispatchError::invalid(format!(
                "policy {} chose ineligible driver {}",
                self.selection.name(),
                selection.driver_id
            )));
        }
        let driver_idx = self.driver_slot(selection.driver_id.get())?;
        debug!(
            passenger = %passenger,
            driver = %selection.driver_id,
            candidates = candidates.len(),
            reason = ?selection.reason,
            "driver selected"
        );

        let requested_at = self.clock.now();
        let trip_id = self.ledger.next_id()?;
        let trip = Trip::in_progress(trip_id, selection.driver_id, passenger, requested_at)?;

        // Ledger insert is the only fallible mutation and runs first.
        self.ledger.insert(trip.clone())?;
        let driver = &mut self.drivers[driver_idx];
        driver.record_driven_trip(trip.id());
        driver.set_status(DriverStatus::Unavailable);
        self.passengers[passenger_idx].record_trip(trip.id());
        self.dispatch_log.push(DispatchRecord {
            trip_id: trip.id(),
            driver_id: selection.driver_id,
            passenger_id: passenger,
            requested_at,
            reason: selection.reason,
        });

        info!(trip = %trip.id(), driver = %trip.driver(), passenger = %passenger, "trip started");
        Ok(trip)
    }

    /// Ends an in-progress trip. The driver becomes available again once none
    /// of their driven trips remain in progress.
    pub fn complete_trip(
        &mut self,
        trip_id: u32,
        end_time: DateTime<Utc>,
        cost: f64,
        rating: u8,
    ) -> Result<Trip> {
        let id = TripId::new(trip_id)?;
        let driver_id = self.find_trip(trip_id)?.driver();
        let driver_idx = self.driver_slot(driver_id.get())?;
        let trip = self
            .ledger
            .get_mut(id)
            .ok_or_else(|| DispatchError::invalid(format!("no trip with id {trip_id}")))?;

        trip.complete(end_time, cost, rating)?;
        let completed = trip.clone();

        let driver = &self.drivers[driver_idx];
        let still_driving = driver
            .driven_trips()
            .iter()
            .filter_map(|other| self.ledger.get(*other))
            .any(Trip::is_in_progress);
        if still_driving {
            debug!(driver = %driver_id, "driver has another trip in progress");
        } else {
            self.drivers[driver_idx].set_status(DriverStatus::Available);
        }

        info!(trip = %id, driver = %driver_id, cost, rating, "trip completed");
        Ok(completed)
    }

    pub fn fleet_counts(&self) -> FleetCounts {
        let mut counts = FleetCounts::default();
        for driver in &self.drivers {
            counts.add_driver(driver.status());
        }
        for trip in &self.ledger {
            counts.add_trip(trip.is_in_progress());
        }
        counts
    }

    /// Rating and earnings for one driver, under the configured fare split.
    pub fn driver_summary(&self, id: u32) -> Result<DriverSummary> {
        let driver = self.find_driver(id)?;
        Ok(self.summarize(driver))
    }

    pub fn driver_summaries(&self) -> Vec<DriverSummary> {
        self.drivers.iter().map(|driver| self.summarize(driver)).collect()
    }

    fn summarize(&self, driver: &Driver) -> DriverSummary {
        let split = &self.config.fare_split;
        DriverSummary {
            driver_id: driver.id(),
            name: driver.name().to_string(),
            status: driver.status(),
            driven_trips: driver.driven_trips().len(),
            average_rating: driver.average_rating(&self.ledger),
            total_revenue: driver.total_revenue_with(&self.ledger, split),
            net_expenditures: driver.net_expenditures_with(&self.ledger, split),
        }
    }
}
