use chrono::NaiveDate;
use common::BillStatus;

/// Number of days ahead (inclusive) that still counts as due-soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

/// Signed whole-day offset from the reference date to the occurrence.
pub fn days_until(due_on: NaiveDate, today: NaiveDate) -> i64 {
    (due_on - today).num_days()
}

/// Buckets a day offset into a status. Total function, no failure modes.
pub fn status_for(days_until_due: i64) -> BillStatus {
    if days_until_due < 0 {
        BillStatus::PastDue
    } else if days_until_due <= DUE_SOON_WINDOW_DAYS {
        BillStatus::DueSoon
    } else {
        BillStatus::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundaries() {
        assert_eq!(status_for(-1), BillStatus::PastDue);
        assert_eq!(status_for(0), BillStatus::DueSoon);
        assert_eq!(status_for(3), BillStatus::DueSoon);
        assert_eq!(status_for(4), BillStatus::Upcoming);
    }

    #[test]
    fn days_until_is_signed() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        let next_month = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        assert_eq!(days_until(yesterday, today), -1);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(next_month, today), 26);
    }
}
