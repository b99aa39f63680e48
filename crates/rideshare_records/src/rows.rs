//! One struct per CSV row shape, converted into core records.

use rideshare_core::records::{Driver, DriverStatus, Passenger, PersonId, Trip, TripId};
use serde::Deserialize;

use crate::error::{LoadError, RecordFile};
use crate::time::parse_timestamp;

#[derive(Debug, Deserialize)]
pub(crate) struct UserRow {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub phone_num: String,
}

impl UserRow {
    pub fn into_passenger(self, row: usize) -> Result<Passenger, LoadError> {
        Passenger::new(self.id, self.name.trim(), self.phone_num.trim())
            .map_err(LoadError::record(RecordFile::Users, row))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriverRow {
    pub id: u32,
    pub name: String,
    pub vin: String,
    pub status: String,
}

impl DriverRow {
    pub fn into_driver(self, row: usize) -> Result<Driver, LoadError> {
        let status = self
            .status
            .parse::<DriverStatus>()
            .map_err(LoadError::record(RecordFile::Drivers, row))?;
        Driver::new(self.id, self.name.trim(), self.vin.trim(), status)
            .map_err(LoadError::record(RecordFile::Drivers, row))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TripRow {
    pub id: u32,
    pub driver_id: u32,
    pub passenger_id: u32,
    pub start_time: String,
    pub end_time: Option<String>,
    pub cost: Option<f64>,
    pub rating: Option<u8>,
}

impl TripRow {
    pub fn into_trip(self, row: usize) -> Result<Trip, LoadError> {
        let file = RecordFile::Trips;
        let id = TripId::new(self.id).map_err(LoadError::record(file, row))?;
        let driver = PersonId::new(self.driver_id).map_err(LoadError::record(file, row))?;
        let passenger = PersonId::new(self.passenger_id).map_err(LoadError::record(file, row))?;
        let start = parse_timestamp(&self.start_time).ok_or_else(|| {
            LoadError::field(file, row, format!("bad start_time {:?}", self.start_time))
        })?;

        let end_time = self.end_time.filter(|raw| !raw.trim().is_empty());
        match (end_time, self.cost, self.rating) {
            (None, None, None) => Trip::in_progress(id, driver, passenger, start)
                .map_err(LoadError::record(file, row)),
            (Some(end_raw), Some(cost), Some(rating)) => {
                let end = parse_timestamp(&end_raw).ok_or_else(|| {
                    LoadError::field(file, row, format!("bad end_time {end_raw:?}"))
                })?;
                Trip::completed(id, driver, passenger, start, end, cost, rating)
                    .map_err(LoadError::record(file, row))
            }
            _ => Err(LoadError::field(
                file,
                row,
                "end_time, cost and rating must be all present or all empty",
            )),
        }
    }
}
