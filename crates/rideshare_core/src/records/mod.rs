//! Passive entity records: drivers, passengers and trips.
//!
//! Records reference each other by ID only. The dispatcher's ID-indexed
//! tables are the single place those IDs resolve to records.

mod driver;
mod ids;
mod passenger;
mod trip;

pub use driver::{Driver, DriverStatus};
pub use ids::{PersonId, TripId, Vin, VIN_LENGTH};
pub use passenger::Passenger;
pub use trip::{Cost, Rating, Trip, TripState};
