//! Trip dispatch and lifecycle engine for a ride-share simulation.
//!
//! A [`Dispatcher`] owns a fixed population of drivers and passengers plus the
//! [`TripLedger`]. It answers lookups, assigns drivers to trip requests using a
//! [`DriverSelection`] policy, and completes trips. Drivers aggregate ratings
//! and earnings over the trips they drove.
//!
//! ```rust
//! use rideshare_core::{DispatchConfig, Dispatcher, DriverStatus, Records};
//! use rideshare_core::records::{Driver, Passenger};
//!
//! let records = Records {
//!     drivers: vec![
//!         Driver::new(3, "Grace", "1C9EVBRM0YBC564DZ", DriverStatus::Available).unwrap(),
//!     ],
//!     passengers: vec![Passenger::new(1, "Ada", "412-432-7640").unwrap()],
//!     trips: Vec::new(),
//! };
//! let mut dispatcher = Dispatcher::new(records, DispatchConfig::default()).unwrap();
//! let trip = dispatcher.request_trip(1).unwrap();
//! assert_eq!(trip.driver().get(), 3);
//! assert!(trip.is_in_progress());
//! ```

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod records;
pub mod selection;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DispatchConfig, SelectionPolicyKind};
pub use dispatcher::{Dispatcher, Records};
pub use error::{DispatchError, Result};
pub use ledger::TripLedger;
pub use pricing::FareSplit;
pub use records::{Driver, DriverStatus, Passenger, PersonId, Trip, TripId, TripState};
pub use selection::{DriverSelection, FirstAvailable, LeastRecentlyDriven};
