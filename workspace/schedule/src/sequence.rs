use common::ScheduledBill;

/// Orders entries for display: status priority first (past-due, then
/// due-soon, then upcoming), occurrence date ascending within a status.
///
/// `sort_by` is stable, so equal-priority, equal-date bills keep their
/// input order.
pub fn order_for_display(entries: &mut [ScheduledBill]) {
    entries.sort_by(|a, b| a.status.cmp(&b.status).then_with(|| a.due_on.cmp(&b.due_on)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::{BillDto, BillStatus};
    use rust_decimal::Decimal;

    fn entry(id: i32, status: BillStatus, due_on: NaiveDate) -> ScheduledBill {
        ScheduledBill {
            bill: BillDto {
                id,
                name: format!("bill-{id}"),
                due_date: due_on.to_string(),
                amount: Decimal::new(1000, 2),
                owner_id: 1,
            },
            due_on,
            days_until_due: 0,
            status,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_priority_dominates_date() {
        let mut entries = vec![
            entry(1, BillStatus::Upcoming, date(2025, 10, 1)),
            entry(2, BillStatus::PastDue, date(2025, 10, 30)),
            entry(3, BillStatus::DueSoon, date(2025, 10, 15)),
        ];
        order_for_display(&mut entries);
        let ids: Vec<i32> = entries.iter().map(|e| e.bill.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn date_breaks_ties_within_status() {
        let mut entries = vec![
            entry(1, BillStatus::Upcoming, date(2025, 11, 20)),
            entry(2, BillStatus::Upcoming, date(2025, 11, 5)),
        ];
        order_for_display(&mut entries);
        let ids: Vec<i32> = entries.iter().map(|e| e.bill.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut entries = vec![
            entry(7, BillStatus::DueSoon, date(2025, 10, 22)),
            entry(3, BillStatus::DueSoon, date(2025, 10, 22)),
            entry(5, BillStatus::DueSoon, date(2025, 10, 22)),
        ];
        order_for_display(&mut entries);
        let ids: Vec<i32> = entries.iter().map(|e| e.bill.id).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }
}
