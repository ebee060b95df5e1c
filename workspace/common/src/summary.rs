use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ViewMode;

/// Total spent in one expense category over the viewing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySpend {
    pub category: String,
    pub total: Decimal,
}

/// Income/expense totals for a user's transactions over a viewing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CashflowSummary {
    /// Reference date the window was anchored to.
    pub as_of: NaiveDate,
    pub view: ViewMode,
    pub income: Decimal,
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net: Decimal,
    /// Expense totals grouped by category, category name ascending.
    pub by_category: Vec<CategorySpend>,
}
