use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status bucket for a projected bill occurrence relative to the reference
/// date.
///
/// The variant order is the display priority: past-due bills sort before
/// due-soon bills, which sort before upcoming ones. The sequencer relies on
/// the derived `Ord` for exactly this.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum BillStatus {
    /// The projected occurrence lies before the reference date.
    PastDue,
    /// Due within the next three days (inclusive), or today.
    DueSoon,
    /// More than three days out.
    Upcoming,
}

/// Viewing window for schedule and cash-flow queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Current calendar month (plus the following month for projections).
    #[default]
    Month,
    /// Current calendar year.
    Year,
}

/// A bill as carried through the schedule pipeline.
///
/// `due_date` is the raw stored representation of the nominal date; it is
/// parsed, not interpreted, by this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BillDto {
    pub id: i32,
    pub name: String,
    pub due_date: String,
    pub amount: Decimal,
    pub owner_id: i32,
}

/// A single projected occurrence of a recurring bill.
///
/// Derived view state: recomputed from scratch on every scheduler pass and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduledBill {
    /// The source bill this occurrence was projected from.
    pub bill: BillDto,
    /// The concrete calendar date the bill is next due.
    pub due_on: NaiveDate,
    /// Signed whole-day offset from the reference date (negative = past).
    pub days_until_due: i64,
    pub status: BillStatus,
}

/// Ordered result of one scheduler pass, bundled with its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BillSchedule {
    /// Reference date the pass was computed against.
    pub as_of: NaiveDate,
    pub view: ViewMode,
    /// Surviving bills in display order.
    pub bills: Vec<ScheduledBill>,
}

impl BillSchedule {
    pub fn new(as_of: NaiveDate, view: ViewMode, bills: Vec<ScheduledBill>) -> Self {
        Self { as_of, view, bills }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&BillStatus::PastDue).unwrap(),
            "\"past-due\""
        );
        assert_eq!(
            serde_json::to_string(&BillStatus::DueSoon).unwrap(),
            "\"due-soon\""
        );
        assert_eq!(
            serde_json::to_string(&BillStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
    }

    #[test]
    fn status_priority_orders_past_due_first() {
        let mut statuses = vec![BillStatus::Upcoming, BillStatus::PastDue, BillStatus::DueSoon];
        statuses.sort();
        assert_eq!(
            statuses,
            vec![BillStatus::PastDue, BillStatus::DueSoon, BillStatus::Upcoming]
        );
    }

    #[test]
    fn view_mode_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<ViewMode>("\"month\"").unwrap(),
            ViewMode::Month
        );
        assert_eq!(
            serde_json::from_str::<ViewMode>("\"year\"").unwrap(),
            ViewMode::Year
        );
    }
}
