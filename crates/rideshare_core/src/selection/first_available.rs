use super::algorithm::DriverSelection;
use super::types::{DriverCandidate, Selection, SelectionReason};
use crate::records::PersonId;

/// Baseline policy: the first available driver in collection order.
///
/// Ignores trip history entirely. Useful for comparing against
/// [`LeastRecentlyDriven`](super::LeastRecentlyDriven) and for predictable tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstAvailable;

impl DriverSelection for FirstAvailable {
    fn select(&self, passenger_id: PersonId, candidates: &[DriverCandidate]) -> Option<Selection> {
        candidates
            .iter()
            .find(|c| c.driver_id != passenger_id)
            .map(|c| Selection {
                driver_id: c.driver_id,
                reason: SelectionReason::FirstAvailable,
            })
    }

    fn name(&self) -> &'static str {
        "first_available"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u32) -> DriverCandidate {
        DriverCandidate {
            driver_id: PersonId::new(id).expect("id"),
            last_trip_start: None,
        }
    }

    #[test]
    fn returns_first_non_self_candidate() {
        let candidates = [candidate(2), candidate(3)];
        let me = PersonId::new(2).expect("id");
        let selection = FirstAvailable.select(me, &candidates).expect("selection");
        assert_eq!(selection.driver_id.get(), 3);
        assert_eq!(selection.reason, SelectionReason::FirstAvailable);
    }
}
