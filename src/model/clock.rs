//! Wall-clock source for computed fields (ages). Injected so tests can pin "now".

use chrono::{Datelike, NaiveDateTime, Timelike};

pub trait Clock: Send + Sync {
    /// Current local date-time without zone.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Whole years elapsed from `from` to `to`, truncated toward zero.
/// Negative when `to` precedes `from`.
pub fn whole_years_between(from: NaiveDateTime, to: NaiveDateTime) -> i32 {
    let mut years = to.year() - from.year();
    let from_key = (from.month(), from.day(), from.num_seconds_from_midnight(), from.nanosecond());
    let to_key = (to.month(), to.day(), to.num_seconds_from_midnight(), to.nanosecond());
    if years > 0 && to_key < from_key {
        years -= 1;
    } else if years < 0 && to_key > from_key {
        years += 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn counts_completed_years_only() {
        assert_eq!(whole_years_between(at(1985, 7, 30, 0), at(2025, 6, 1, 0)), 39);
        assert_eq!(whole_years_between(at(1985, 7, 30, 0), at(2025, 7, 30, 0)), 40);
        assert_eq!(whole_years_between(at(1985, 7, 30, 12), at(2025, 7, 30, 11)), 39);
    }

    #[test]
    fn same_instant_is_zero() {
        assert_eq!(whole_years_between(at(2023, 1, 15, 0), at(2023, 1, 15, 0)), 0);
    }

    #[test]
    fn future_start_is_negative_and_truncated() {
        assert_eq!(whole_years_between(at(2025, 6, 1, 0), at(2024, 7, 1, 0)), 0);
        assert_eq!(whole_years_between(at(2025, 6, 1, 0), at(2023, 7, 1, 0)), -1);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(at(2025, 6, 1, 0));
        assert_eq!(clock.now(), clock.now());
    }
}
