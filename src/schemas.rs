use chrono::NaiveDate;
use common::{BillDto, BillSchedule, BillStatus, CashflowSummary, CategorySpend, ScheduledBill, ViewMode};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Schedule(BillSchedule),
    Summary(CashflowSummary),
}

/// Stable fingerprint of a handler's exact compute inputs.
///
/// Used as the memo key for cached pipeline results: any change to the
/// underlying rows, the reference date, or the view mode lands on a fresh
/// cache entry instead of a stale one.
pub fn input_fingerprint<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Query parameters for schedule and cash-flow endpoints
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct WindowQuery {
    /// Viewing window: "month" (default) or "year"
    pub view: Option<ViewMode>,
    /// Reference date (YYYY-MM-DD); defaults to the current date
    pub today: Option<NaiveDate>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::get_accounts,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,
        crate::handlers::bills::create_bill,
        crate::handlers::bills::get_bills,
        crate::handlers::bills::update_bill,
        crate::handlers::bills::delete_bill,
        crate::handlers::schedule::get_bill_schedule,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::get_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::transactions::get_cashflow_summary,
        crate::handlers::goals::create_goal,
        crate::handlers::goals::get_goals,
        crate::handlers::goals::update_goal,
        crate::handlers::goals::delete_goal,
    ),
    components(
        schemas(
            ApiResponse<BillSchedule>,
            ApiResponse<CashflowSummary>,
            ErrorResponse,
            HealthResponse,
            WindowQuery,
            BillStatus,
            ViewMode,
            BillDto,
            ScheduledBill,
            BillSchedule,
            CashflowSummary,
            CategorySpend,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User CRUD endpoints"),
        (name = "accounts", description = "Account CRUD endpoints"),
        (name = "bills", description = "Bill CRUD and schedule endpoints"),
        (name = "transactions", description = "Transaction CRUD and cash-flow endpoints"),
        (name = "goals", description = "Goal CRUD endpoints"),
    ),
    info(
        title = "FinTrack API",
        description = "Personal Finance Tracker API - accounts, transactions, recurring bills and goals",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
