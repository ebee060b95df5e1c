//! Recurring-bill due-date resolution and status classification.
//!
//! This crate is a pure library: it performs no I/O, reads no ambient clock,
//! and holds no state between invocations. The HTTP layer fetches a user's
//! bills, picks a reference date, and calls [`upcoming_bills`]; everything
//! here is a single synchronous pass over that snapshot.
//!
//! Pipeline: normalize the stored date ([`normalize`]), project the next
//! occurrence ([`project`]), classify it against the reference date
//! ([`classify`]), restrict to the viewing window ([`filter`]), and order for
//! display ([`sequence`]).

pub mod classify;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod project;
pub mod sequence;

pub use error::DateParseError;

use chrono::NaiveDate;
use common::{BillDto, BillSchedule, ScheduledBill, ViewMode};
use model::entities::bill;
use tracing::debug;

/// Runs the full scheduler pass over a snapshot of stored bills.
///
/// Bills whose stored date does not normalize are excluded from the output,
/// never surfaced as errors. The result is freshly allocated and the
/// function is deterministic, so repeated invocation with the same inputs
/// yields an identical schedule, and concurrent invocations are safe.
pub fn upcoming_bills(bills: &[bill::Model], today: NaiveDate, view: ViewMode) -> Vec<ScheduledBill> {
    let mut entries = Vec::with_capacity(bills.len());

    for bill in bills {
        let nominal = match normalize::normalize_date(&bill.due_date) {
            Ok(date) => date,
            Err(reason) => {
                debug!(bill_id = bill.id, %reason, "skipping bill with unusable due date");
                continue;
            }
        };

        let due_on = project::next_occurrence(nominal, today);
        if !filter::retained(nominal, due_on, today, view) {
            continue;
        }

        let days_until_due = classify::days_until(due_on, today);
        entries.push(ScheduledBill {
            bill: to_dto(bill),
            due_on,
            days_until_due,
            status: classify::status_for(days_until_due),
        });
    }

    sequence::order_for_display(&mut entries);
    entries
}

/// Convenience wrapper bundling one scheduler pass with its inputs for
/// transport.
pub fn build_schedule(bills: &[bill::Model], today: NaiveDate, view: ViewMode) -> BillSchedule {
    BillSchedule::new(today, view, upcoming_bills(bills, today, view))
}

fn to_dto(bill: &bill::Model) -> BillDto {
    BillDto {
        id: bill.id,
        name: bill.name.clone(),
        due_date: bill.due_date.clone(),
        amount: bill.amount,
        owner_id: bill.owner_id,
    }
}
