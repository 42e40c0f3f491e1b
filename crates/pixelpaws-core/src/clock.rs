//! Time source and calendar helpers.

use std::cell::Cell;

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};

pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance_ms(minutes * 60 * 1000);
    }

    pub fn advance_hours(&self, hours: i64) {
        self.advance_minutes(hours * 60);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

fn local_time(now_ms: i64, utc_offset_minutes: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))?;
    Utc.timestamp_millis_opt(now_ms)
        .single()
        .map(|dt| dt.with_timezone(&offset))
}

/// Calendar day index (days since 0001-01-01) in the given offset.
pub fn day_index(now_ms: i64, utc_offset_minutes: i32) -> i64 {
    local_time(now_ms, utc_offset_minutes)
        .map(|dt| i64::from(dt.date_naive().num_days_from_ce()))
        .unwrap_or_else(|| now_ms.div_euclid(24 * 60 * 60 * 1000))
}

/// Hour of the day (0–23) in the given offset.
pub fn local_hour(now_ms: i64, utc_offset_minutes: i32) -> u32 {
    local_time(now_ms, utc_offset_minutes)
        .map(|dt| dt.hour())
        .unwrap_or(12)
}

/// RFC 3339 timestamp for records shown to the owner.
pub fn rfc3339(now_ms: i64) -> String {
    Utc.timestamp_millis_opt(now_ms)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-10T23:30:00Z
    const LATE_EVENING: i64 = 1_710_113_400_000;

    #[test]
    fn test_manual_clock() {
        let c = ManualClock::new(1_000);
        c.advance_minutes(2);
        assert_eq!(c.now_ms(), 121_000);
        c.set(5);
        assert_eq!((&c).now_ms(), 5);
    }

    #[test]
    fn test_day_index_respects_offset() {
        let utc = day_index(LATE_EVENING, 0);
        // One hour east it's already the next day
        assert_eq!(day_index(LATE_EVENING, 60), utc + 1);
        assert_eq!(day_index(LATE_EVENING, -300), utc);
    }

    #[test]
    fn test_local_hour() {
        assert_eq!(local_hour(LATE_EVENING, 0), 23);
        assert_eq!(local_hour(LATE_EVENING, 60), 0);
        assert_eq!(local_hour(LATE_EVENING, -300), 18);
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(rfc3339(0), "1970-01-01T00:00:00+00:00");
    }
}
