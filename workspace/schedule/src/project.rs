use chrono::{Datelike, NaiveDate};

/// Projects the next occurrence of a bill's nominal due date relative to
/// `today`.
///
/// Only the day-of-month of the nominal date recurs. The occurrence lands in
/// the current month unless it has already passed: either the day-of-month is
/// earlier than today's, or the day matches but the nominal date itself lies
/// strictly before today. Month overflow normalizes (December rolls into
/// January of the following year).
pub fn next_occurrence(nominal: NaiveDate, today: NaiveDate) -> NaiveDate {
    let bill_day = nominal.day();
    let passed = bill_day < today.day() || (bill_day == today.day() && today > nominal);

    let (year, month) = if passed {
        month_after(today.year(), today.month())
    } else {
        (today.year(), today.month())
    };

    clamp_to_month(year, month, bill_day)
}

/// The calendar month immediately following the given one.
pub(crate) fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Builds a date in the given month, clamping a day-of-month the month cannot
/// hold to its last day (day 31 in April resolves to April 30).
fn clamp_to_month(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        // Get the last day of the month
        let last_day = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap()
            .checked_add_months(chrono::Months::new(1))
            .unwrap()
            .pred_opt()
            .unwrap()
            .day();
        NaiveDate::from_ymd_opt(year, month, last_day).unwrap()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn later_day_stays_in_current_month() {
        // Bill day 22, today the 20th: due in two days.
        assert_eq!(
            next_occurrence(date(2025, 10, 22), date(2025, 10, 20)),
            date(2025, 10, 22)
        );
    }

    #[test]
    fn earlier_day_rolls_to_next_month() {
        // Bill day 15 has passed by the 20th, so it recurs on November 15th.
        assert_eq!(
            next_occurrence(date(2025, 9, 15), date(2025, 10, 20)),
            date(2025, 11, 15)
        );
    }

    #[test]
    fn december_rollover_lands_in_january() {
        assert_eq!(
            next_occurrence(date(2025, 11, 5), date(2025, 12, 20)),
            date(2026, 1, 5)
        );
    }

    #[test]
    fn same_day_nominal_is_due_today() {
        // The nominal date IS today: not yet passed.
        assert_eq!(
            next_occurrence(date(2025, 10, 20), date(2025, 10, 20)),
            date(2025, 10, 20)
        );
    }

    #[test]
    fn same_day_older_nominal_rolls_forward() {
        // Recorded months ago with today's day-of-month: this month's
        // occurrence is considered passed.
        assert_eq!(
            next_occurrence(date(2025, 7, 20), date(2025, 10, 20)),
            date(2025, 11, 20)
        );
    }

    #[test]
    fn rolls_day_31_clamps_into_short_month() {
        // Day 31 projected into November clamps to the 30th.
        assert_eq!(
            next_occurrence(date(2025, 8, 31), date(2025, 11, 5)),
            date(2025, 11, 30)
        );
    }

    #[test]
    fn day_31_at_end_of_april_clamps_to_april_30() {
        // bill_day 31 > day 30, so the occurrence stays in April and clamps.
        assert_eq!(
            next_occurrence(date(2025, 1, 31), date(2025, 4, 30)),
            date(2025, 4, 30)
        );
    }

    #[test]
    fn day_31_clamps_into_february() {
        assert_eq!(
            next_occurrence(date(2025, 1, 31), date(2025, 2, 10)),
            date(2025, 2, 28)
        );
        // Leap year keeps the 29th.
        assert_eq!(
            next_occurrence(date(2024, 1, 31), date(2024, 2, 10)),
            date(2024, 2, 29)
        );
    }
}
