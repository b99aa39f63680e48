use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Source of "now" for trip start times.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Millisecond resolution, saturating at
/// the bounds of [`DateTime<Utc>`].
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now_ms: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now_ms.store(now.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        let by = by.num_milliseconds();
        let _ = self
            .now_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |ms| {
                Some(clamp_millis(ms.saturating_add(by)))
            });
    }
}

fn clamp_millis(ms: i64) -> i64 {
    ms.clamp(
        DateTime::<Utc>::MIN_UTC.timestamp_millis(),
        DateTime::<Utc>::MAX_UTC.timestamp_millis(),
    )
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        // `advance` keeps the stored value in range, so this never falls back.
        DateTime::from_timestamp_millis(self.now_ms.load(Ordering::SeqCst))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_time;

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new(test_time("2018-08-01T10:00:00Z"));
        assert_eq!(clock.now(), test_time("2018-08-01T10:00:00Z"));
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), test_time("2018-08-01T10:05:00Z"));
        clock.set(test_time("2019-01-01T00:00:00Z"));
        assert_eq!(clock.now(), test_time("2019-01-01T00:00:00Z"));
    }

    #[test]
    fn advance_saturates_instead_of_wrapping() {
        let clock = ManualClock::new(test_time("2018-08-01T10:00:00Z"));
        clock.advance(Duration::milliseconds(i64::MAX));
        let pinned = clock.now();
        assert!(pinned > test_time("9999-12-31T00:00:00Z"));

        clock.advance(Duration::milliseconds(i64::MAX));
        assert_eq!(clock.now(), pinned);

        clock.advance(Duration::milliseconds(i64::MIN + 1));
        clock.advance(Duration::milliseconds(i64::MIN + 1));
        assert!(clock.now() < test_time("0001-01-01T00:00:00Z"));
    }

    #[test]
    fn shared_clock_reads_through_arc() {
        let clock = Arc::new(ManualClock::new(test_time("2018-08-01T10:00:00Z")));
        let handle: Box<dyn Clock> = Box::new(Arc::clone(&clock));
        clock.advance(Duration::seconds(30));
        assert_eq!(handle.now(), test_time("2018-08-01T10:00:30Z"));
    }

    #[test]
    fn system_clock_is_close_to_now() {
        let delta = SystemClock.now() - Utc::now();
        assert!(delta.num_seconds().abs() < 5);
    }
}
