//! Common transport-layer types shared between the HTTP layer and the
//! schedule crate. These structs mirror the backend handlers' response
//! payloads so both sides agree on shapes without duplicating them.

mod schedule;
mod summary;

pub use schedule::{BillDto, BillSchedule, BillStatus, ScheduledBill, ViewMode};
pub use summary::{CashflowSummary, CategorySpend};
