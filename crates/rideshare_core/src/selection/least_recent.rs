use super::algorithm::DriverSelection;
use super::types::{DriverCandidate, Selection, SelectionReason};
use crate::records::PersonId;

/// Default dispatch policy: spread work across the fleet.
///
/// 1. A driver who has never driven wins outright (first in collection order).
/// 2. Otherwise the driver whose most recent trip started earliest wins, ties
///    going to the earlier driver in collection order.
///
/// The requesting passenger's own driver record is skipped, so the next-best
/// driver under the same ordering is chosen instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastRecentlyDriven;

impl DriverSelection for LeastRecentlyDriven {
    fn select(&self, passenger_id: PersonId, candidates: &[DriverCandidate]) -> Option<Selection> {
        let eligible = candidates.iter().filter(|c| c.driver_id != passenger_id);

        if let Some(fresh) = eligible.clone().find(|c| c.last_trip_start.is_none()) {
            return Some(Selection {
                driver_id: fresh.driver_id,
                reason: SelectionReason::NeverDriven,
            });
        }

        // min_by_key keeps the first of equal keys, which is the collection-order tie-break.
        eligible
            .filter_map(|c| c.last_trip_start.map(|start| (start, c.driver_id)))
            .min_by_key(|(start, _)| *start)
            .map(|(last_trip_start, driver_id)| Selection {
                driver_id,
                reason: SelectionReason::LeastRecentlyDriven { last_trip_start },
            })
    }

    fn name(&self) -> &'static str {
        "least_recently_driven"
    }
}
