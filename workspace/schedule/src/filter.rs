use chrono::{Datelike, NaiveDate};
use common::ViewMode;

use crate::project::month_after;

/// Decides whether a bill stays in the requested viewing window.
///
/// Month mode keeps a bill when its projected occurrence falls in the current
/// or the immediately following calendar month, or when the nominal date
/// itself sits in the current month. The last arm keeps a bill due this month
/// visible even after projection rolled it into the next one.
///
/// Year mode keeps a bill when either the nominal or the projected year is
/// the current one.
pub fn retained(nominal: NaiveDate, due_on: NaiveDate, today: NaiveDate, view: ViewMode) -> bool {
    match view {
        ViewMode::Month => {
            let current = (today.year(), today.month());
            let next = month_after(today.year(), today.month());
            in_month(due_on, current) || in_month(due_on, next) || in_month(nominal, current)
        }
        ViewMode::Year => nominal.year() == today.year() || due_on.year() == today.year(),
    }
}

fn in_month(date: NaiveDate, (year, month): (i32, u32)) -> bool {
    date.year() == year && date.month() == month
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const TODAY: (i32, u32, u32) = (2025, 10, 20);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn month_filter_keeps_current_month_occurrence() {
        assert!(retained(
            date(2025, 10, 22),
            date(2025, 10, 22),
            today(),
            ViewMode::Month
        ));
    }

    #[test]
    fn month_filter_keeps_next_month_occurrence() {
        assert!(retained(
            date(2025, 9, 15),
            date(2025, 11, 15),
            today(),
            ViewMode::Month
        ));
    }

    #[test]
    fn month_filter_keeps_unprojected_current_month() {
        // Nominal date sits in October even though the occurrence rolled to
        // November; the bill must not vanish from "this month".
        assert!(retained(
            date(2025, 10, 5),
            date(2025, 11, 5),
            today(),
            ViewMode::Month
        ));
    }

    #[test]
    fn month_filter_drops_unrelated_months() {
        // Nominal in January, occurrence projected past next month.
        assert!(!retained(
            date(2026, 1, 15),
            date(2026, 1, 15),
            date(2025, 11, 20),
            ViewMode::Month
        ));
    }

    #[test]
    fn year_filter_accepts_either_year() {
        // Nominal in the current year.
        assert!(retained(
            date(2025, 3, 10),
            date(2025, 11, 10),
            today(),
            ViewMode::Year
        ));
        // December nominal whose occurrence rolled into next year.
        assert!(retained(
            date(2025, 12, 5),
            date(2026, 1, 5),
            date(2025, 12, 20),
            ViewMode::Year
        ));
        // Neither year matches.
        assert!(!retained(
            date(2023, 6, 1),
            date(2026, 1, 1),
            date(2025, 12, 31),
            ViewMode::Year
        ));
    }
}
