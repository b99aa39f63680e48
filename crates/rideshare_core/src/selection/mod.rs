pub mod algorithm;
pub mod first_available;
pub mod least_recent;
pub mod types;

pub use algorithm::DriverSelection;
pub use first_available::FirstAvailable;
pub use least_recent::LeastRecentlyDriven;
pub use types::{DriverCandidate, Selection, SelectionReason};
