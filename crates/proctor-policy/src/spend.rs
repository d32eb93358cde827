// spend.rs — Daily spend accumulator.
//
// Process-lifetime state, owned exclusively by the policy evaluator. The
// running total belongs to one local calendar date; observing a different
// date resets it to zero before anything else happens. Nothing is persisted.

use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct DailySpendState {
    used_today: f64,
    reset_date: NaiveDate,
}

impl DailySpendState {
    pub fn new() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    pub(crate) fn starting_on(date: NaiveDate) -> Self {
        Self {
            used_today: 0.0,
            reset_date: date,
        }
    }

    /// The running total as of `today` — zero when the date has rolled over.
    pub(crate) fn used_on(&self, today: NaiveDate) -> f64 {
        if self.reset_date == today {
            self.used_today
        } else {
            0.0
        }
    }

    /// Add to the running total, resetting first if the date changed.
    pub(crate) fn add_on(&mut self, amount: f64, today: NaiveDate) {
        if self.reset_date != today {
            self.used_today = 0.0;
            self.reset_date = today;
        }
        self.used_today += amount;
    }

    /// Today's running total.
    pub fn used_today(&self) -> f64 {
        self.used_on(Local::now().date_naive())
    }
}

impl Default for DailySpendState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn accumulates_within_one_date() {
        let mut state = DailySpendState::starting_on(date("2026-08-25"));
        state.add_on(30.0, date("2026-08-25"));
        state.add_on(12.5, date("2026-08-25"));
        assert_eq!(state.used_on(date("2026-08-25")), 42.5);
    }

    #[test]
    fn rollover_resets_before_adding() {
        let mut state = DailySpendState::starting_on(date("2026-08-25"));
        state.add_on(150.0, date("2026-08-25"));
        state.add_on(10.0, date("2026-08-26"));
        assert_eq!(state.used_on(date("2026-08-26")), 10.0);
    }

    #[test]
    fn used_on_a_new_date_reads_as_zero_without_mutation() {
        let mut state = DailySpendState::starting_on(date("2026-08-25"));
        state.add_on(99.0, date("2026-08-25"));
        assert_eq!(state.used_on(date("2026-08-26")), 0.0);
        // The stored total is still there for the original date.
        assert_eq!(state.used_on(date("2026-08-25")), 99.0);
    }
}
