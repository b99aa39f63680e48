use super::types::{DriverCandidate, Selection};
use crate::records::PersonId;

/// Ranks available drivers for a trip request.
///
/// Policies are pure: they see a snapshot of the available drivers and return a
/// choice without touching dispatcher state.
///
/// # Examples
///
/// ```rust
/// use rideshare_core::records::PersonId;
/// use rideshare_core::selection::{DriverCandidate, DriverSelection, LeastRecentlyDriven};
///
/// let passenger = PersonId::new(1).unwrap();
/// let candidates = [DriverCandidate {
///     driver_id: PersonId::new(3).unwrap(),
///     last_trip_start: None,
/// }];
/// let selection = LeastRecentlyDriven.select(passenger, &candidates).unwrap();
/// assert_eq!(selection.driver_id.get(), 3);
/// ```
pub trait DriverSelection: Send + Sync {
    /// Pick a driver for `passenger_id`.
    ///
    /// # Arguments
    ///
    /// * `passenger_id` - Identity of the requesting passenger. A candidate with the
    ///   same identity is the same person and must never be returned.
    /// * `candidates` - Available drivers in collection order.
    ///
    /// # Returns
    ///
    /// `None` when no candidate other than the passenger themself exists.
    fn select(&self, passenger_id: PersonId, candidates: &[DriverCandidate]) -> Option<Selection>;

    fn name(&self) -> &'static str;
}
