//! Simulated trading clock — tags timestamps with a Taiwan exchange session.
//! Never gates the loop; the feed alone drives bar progression.

use chrono::{NaiveDateTime, Timelike};

use crate::domain::{Session, TX_DAY, TX_NIGHT};

pub trait Clock {
    fn now(&self) -> Option<NaiveDateTime>;
    fn session_for(&self, timestamp: NaiveDateTime) -> Session;
    fn is_trading_hours(&self, timestamp: NaiveDateTime) -> bool;
}

#[derive(Debug, Default)]
pub struct SimulatedClock {
    current: Option<NaiveDateTime>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn advance_to(&mut self, timestamp: NaiveDateTime) {
        self.current = Some(timestamp);
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Option<NaiveDateTime> {
        self.current
    }

    fn session_for(&self, timestamp: NaiveDateTime) -> Session {
        let hm = (timestamp.hour(), timestamp.minute());
        if within_window(hm, (TX_DAY.start_hour, TX_DAY.start_minute), (TX_DAY.end_hour, TX_DAY.end_minute)) {
            Session::Day
        } else {
            Session::Night
        }
    }

    fn is_trading_hours(&self, timestamp: NaiveDateTime) -> bool {
        let hm = (timestamp.hour(), timestamp.minute());
        let in_day = within_window(hm, (TX_DAY.start_hour, TX_DAY.start_minute), (TX_DAY.end_hour, TX_DAY.end_minute));
        let in_night = within_window(
            hm,
            (TX_NIGHT.start_hour, TX_NIGHT.start_minute),
            (TX_NIGHT.end_hour, TX_NIGHT.end_minute),
        );
        in_day || in_night
    }
}

/// True if `hm` falls in `[start, end)`, handling windows that wrap past midnight
/// (the night session runs 15:00 through 05:00 the next day).
fn within_window(hm: (u32, u32), start: (u32, u32), end: (u32, u32)) -> bool {
    if start <= end {
        hm >= start && hm < end
    } else {
        hm >= start || hm < end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn day_session_window_is_recognized() {
        let clock = SimulatedClock::new();
        assert_eq!(clock.session_for(dt(9, 0)), Session::Day);
        assert!(clock.is_trading_hours(dt(9, 0)));
    }

    #[test]
    fn night_session_wraps_past_midnight() {
        let clock = SimulatedClock::new();
        assert_eq!(clock.session_for(dt(23, 0)), Session::Night);
        assert!(clock.is_trading_hours(dt(23, 0)));
        assert!(clock.is_trading_hours(dt(2, 0)));
    }

    #[test]
    fn outside_any_window_is_not_trading_hours() {
        let clock = SimulatedClock::new();
        assert!(!clock.is_trading_hours(dt(14, 0)));
    }

    #[test]
    fn advance_to_updates_now() {
        let mut clock = SimulatedClock::new();
        assert!(clock.now().is_none());
        clock.advance_to(dt(9, 0));
        assert_eq!(clock.now(), Some(dt(9, 0)));
    }
}
