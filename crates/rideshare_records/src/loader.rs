use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rideshare_core::records::PersonId;
use rideshare_core::Records;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{LoadError, RecordFile};
use crate::rows::{DriverRow, TripRow, UserRow};

/// Locations of the three record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPaths {
    pub users: PathBuf,
    pub drivers: PathBuf,
    pub trips: PathBuf,
}

impl RecordPaths {
    /// `users.csv`, `drivers.csv` and `trips.csv` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            users: dir.join("users.csv"),
            drivers: dir.join("drivers.csv"),
            trips: dir.join("trips.csv"),
        }
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_records(paths: &RecordPaths) -> Result<Records, LoadError> {
    info!(users = ?paths.users, drivers = ?paths.drivers, trips = ?paths.trips, "loading records");
    load_records_from_readers(open(&paths.users)?, open(&paths.drivers)?, open(&paths.trips)?)
}

/// Data rows start on line 2, after the header.
fn read_rows<T, R>(reader: R, file: RecordFile) -> Result<Vec<(usize, T)>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize()
        .enumerate()
        .map(|(idx, row)| {
            row.map(|row| (idx + 2, row))
                .map_err(|source| LoadError::Csv { file, source })
        })
        .collect()
}

/// Read and cross-link all three record sets.
///
/// Each trip is appended to its driver's and passenger's history in file order.
pub fn load_records_from_readers(
    users: impl Read,
    drivers: impl Read,
    trips: impl Read,
) -> Result<Records, LoadError> {
    let passengers = read_rows::<UserRow, _>(users, RecordFile::Users)?
        .into_iter()
        .map(|(row, user)| user.into_passenger(row))
        .collect::<Result<Vec<_>, _>>()?;
    let drivers = read_rows::<DriverRow, _>(drivers, RecordFile::Drivers)?
        .into_iter()
        .map(|(row, driver)| driver.into_driver(row))
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Records {
        drivers,
        passengers,
        trips: Vec::new(),
    };
    let driver_slots: HashMap<PersonId, usize> = records
        .drivers
        .iter()
        .enumerate()
        .map(|(idx, driver)| (driver.id(), idx))
        .collect();
    let passenger_slots: HashMap<PersonId, usize> = records
        .passengers
        .iter()
        .enumerate()
        .map(|(idx, passenger)| (passenger.id(), idx))
        .collect();

    for (row, trip_row) in read_rows::<TripRow, _>(trips, RecordFile::Trips)? {
        let trip = trip_row.into_trip(row)?;
        let driver_idx = *driver_slots.get(&trip.driver()).ok_or_else(|| {
            LoadError::field(RecordFile::Trips, row, format!("unknown driver {}", trip.driver()))
        })?;
        let passenger_idx = *passenger_slots.get(&trip.passenger()).ok_or_else(|| {
            let message = format!("unknown passenger {}", trip.passenger());
            LoadError::field(RecordFile::Trips, row, message)
        })?;

        records.drivers[driver_idx]
            .add_driven_trip(&trip)
            .map_err(LoadError::record(RecordFile::Trips, row))?;
        records.passengers[passenger_idx]
            .add_trip(&trip)
            .map_err(LoadError::record(RecordFile::Trips, row))?;
        debug!(trip = %trip.id(), row, "linked trip");
        records.trips.push(trip);
    }

    info!(
        drivers = records.drivers.len(),
        passengers = records.passengers.len(),
        trips = records.trips.len(),
        "records loaded"
    );
    Ok(records)
}
