//! Loads users, drivers and trips from CSV into linked [`Records`](rideshare_core::Records).
//!
//! File formats (headers required):
//!
//! - users: `id,name,phone_num`
//! - drivers: `id,name,vin,status`
//! - trips: `id,driver_id,passenger_id,start_time,end_time,cost,rating`, with the
//!   last three empty for a trip still in progress

pub mod error;
pub mod loader;
mod rows;
pub mod time;

pub use error::{LoadError, RecordFile};
pub use loader::{load_records, load_records_from_readers, RecordPaths};
