//! Wall-clock handling.
//!
//! Recommendations turn "minutes from now" into clock times in the
//! network's local zone. The current instant comes from a `Clock` so that
//! the same inputs always render the same strings under test.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

/// The zone BART publishes times in.
pub const NETWORK_TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format `now + minutes` as a 24-hour `HH:MM` time in `tz`.
///
/// Zero minutes renders as "Leaving", matching the provider's wording.
///
/// # Examples
///
/// ```
/// use bart_server::domain::{NETWORK_TIME_ZONE, format_departure_time};
/// use chrono::{TimeZone, Utc};
///
/// // 17:00 UTC is 10:00 Pacific daylight time
/// let now = Utc.with_ymd_and_hms(2026, 7, 1, 17, 0, 0).unwrap();
/// assert_eq!(format_departure_time(now, 5, NETWORK_TIME_ZONE), "10:05");
/// assert_eq!(format_departure_time(now, 0, NETWORK_TIME_ZONE), "Leaving");
/// ```
pub fn format_departure_time(now: DateTime<Utc>, minutes: u32, tz: Tz) -> String {
    if minutes == 0 {
        return "Leaving".to_string();
    }

    let at = now + Duration::minutes(i64::from(minutes));
    at.with_timezone(&tz).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_pacific_time() {
        // 2026-01-15 08:30 UTC is 00:30 PST
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(format_departure_time(now, 1, NETWORK_TIME_ZONE), "00:31");
    }

    #[test]
    fn crosses_midnight() {
        // 2026-01-15 07:50 UTC is 23:50 PST on the 14th
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 7, 50, 0).unwrap();
        assert_eq!(format_departure_time(now, 15, NETWORK_TIME_ZONE), "00:05");
    }

    #[test]
    fn daylight_saving_offset() {
        let summer = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_departure_time(summer, 10, NETWORK_TIME_ZONE), "05:10");
        assert_eq!(format_departure_time(winter, 10, NETWORK_TIME_ZONE), "04:10");
    }

    #[test]
    fn zero_minutes_is_leaving() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_departure_time(now, 0, NETWORK_TIME_ZONE), "Leaving");
    }

    #[test]
    fn fixed_clock_is_stable() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 16, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), instant);
    }
}
