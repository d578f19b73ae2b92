//! Week window arithmetic.
//!
//! The dashboard always displays one Monday-aligned week at a time. This
//! module provides the [`WeekStart`] pointer and the navigation operations
//! (previous/current/next) that mutate it.

use chrono::{Datelike, Days, Local, NaiveDate};

/// Display labels for the seven columns, Monday first.
pub const DAY_NAMES: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// The Monday that starts a displayed week.
///
/// The wrapped date is always Monday-aligned; the only constructors are
/// [`WeekStart::containing`] and [`WeekStart::current`], both of which snap
/// to the Monday of the week containing their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekStart(NaiveDate);

impl WeekStart {
    /// Get the week containing the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_monday());
        // Subtracting at most 6 days cannot leave the representable range
        // for any date chrono can produce from user input.
        Self(date.checked_sub_days(Days::new(back)).unwrap_or(date))
    }

    /// Get the week containing today (local time).
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// The Monday this week starts on.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.0
    }

    /// The Sunday this week ends on.
    #[must_use]
    pub fn end(self) -> NaiveDate {
        self.0.checked_add_days(Days::new(6)).unwrap_or(self.0)
    }

    /// The week after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.checked_add_days(Days::new(7)).unwrap_or(self.0))
    }

    /// The week before this one.
    #[must_use]
    pub fn previous(self) -> Self {
        Self(self.0.checked_sub_days(Days::new(7)).unwrap_or(self.0))
    }

    /// The seven consecutive dates of this week, Monday first.
    #[must_use]
    pub fn days(self) -> [NaiveDate; 7] {
        let mut days = [self.0; 7];
        let mut day = self.0;
        for slot in &mut days[1..] {
            day = day.checked_add_days(Days::new(1)).unwrap_or(day);
            *slot = day;
        }
        days
    }

    /// Check whether a date falls inside this week's window.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_containing_monday_is_identity() {
        // 2024-01-01 is a Monday
        let monday = date(2024, 1, 1);
        assert_eq!(WeekStart::containing(monday).start(), monday);
    }

    #[test]
    fn test_containing_snaps_back_to_monday() {
        let monday = date(2024, 1, 1);
        for offset in 0..7 {
            let day = monday.checked_add_days(Days::new(offset)).unwrap();
            assert_eq!(WeekStart::containing(day).start(), monday, "offset {offset}");
        }
    }

    #[test]
    fn test_next_week() {
        let week = WeekStart::containing(date(2024, 1, 1));
        assert_eq!(week.next().start(), date(2024, 1, 8));
    }

    #[test]
    fn test_previous_week() {
        let week = WeekStart::containing(date(2024, 1, 8));
        assert_eq!(week.previous().start(), date(2024, 1, 1));
    }

    #[test]
    fn test_current_is_monday_aligned() {
        let week = WeekStart::current();
        assert_eq!(week.start().weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn test_days_are_consecutive() {
        let week = WeekStart::containing(date(2024, 1, 1));
        let days = week.days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 1, 1));
        assert_eq!(days[6], date(2024, 1, 7));
        for pair in days.windows(2) {
            assert_eq!(pair[1], pair[0].checked_add_days(Days::new(1)).unwrap());
        }
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let week = WeekStart::containing(date(2024, 1, 29));
        let days = week.days();
        assert_eq!(days[0], date(2024, 1, 29));
        assert_eq!(days[6], date(2024, 2, 4));
    }

    #[test]
    fn test_contains() {
        let week = WeekStart::containing(date(2024, 1, 1));
        assert!(week.contains(date(2024, 1, 1)));
        assert!(week.contains(date(2024, 1, 7)));
        assert!(!week.contains(date(2024, 1, 8)));
        assert!(!week.contains(date(2023, 12, 31)));
    }

    #[test]
    fn test_display_is_iso_date() {
        let week = WeekStart::containing(date(2024, 1, 1));
        assert_eq!(week.to_string(), "2024-01-01");
    }

    #[test]
    fn test_day_names_count() {
        assert_eq!(DAY_NAMES.len(), 7);
        assert_eq!(DAY_NAMES[0], "Monday");
        assert_eq!(DAY_NAMES[6], "Sunday");
    }

    proptest! {
        #[test]
        fn prop_containing_is_idempotent(offset in 0u64..40_000) {
            let base = date(1970, 1, 1);
            let day = base.checked_add_days(Days::new(offset)).unwrap();
            let week = WeekStart::containing(day);
            prop_assert_eq!(WeekStart::containing(week.start()), week);
        }

        #[test]
        fn prop_next_then_previous_is_identity(offset in 0u64..40_000) {
            let base = date(1970, 1, 1);
            let day = base.checked_add_days(Days::new(offset)).unwrap();
            let week = WeekStart::containing(day);
            prop_assert_eq!(week.next().previous(), week);
        }

        #[test]
        fn prop_window_contains_its_source_date(offset in 0u64..40_000) {
            let base = date(1970, 1, 1);
            let day = base.checked_add_days(Days::new(offset)).unwrap();
            let week = WeekStart::containing(day);
            prop_assert!(week.contains(day));
            prop_assert_eq!(week.start().weekday(), chrono::Weekday::Mon);
        }
    }
}
