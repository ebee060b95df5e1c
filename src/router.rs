use crate::handlers::{
    accounts::{create_account, delete_account, get_account, get_accounts, update_account},
    bills::{create_bill, delete_bill, get_bills, update_bill},
    goals::{create_goal, delete_goal, get_goals, update_goal},
    health::health_check,
    schedule::get_bill_schedule,
    transactions::{
        create_transaction, delete_transaction, get_cashflow_summary, get_transaction,
        get_transactions, update_transaction,
    },
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Account CRUD routes
        .route("/api/v1/users/:user_id/accounts", post(create_account))
        .route("/api/v1/users/:user_id/accounts", get(get_accounts))
        .route("/api/v1/users/:user_id/accounts/:account_id", get(get_account))
        .route("/api/v1/users/:user_id/accounts/:account_id", put(update_account))
        .route("/api/v1/users/:user_id/accounts/:account_id", delete(delete_account))
        // Bill CRUD routes
        .route("/api/v1/users/:user_id/bills", post(create_bill))
        .route("/api/v1/users/:user_id/bills", get(get_bills))
        .route("/api/v1/users/:user_id/bills/:bill_id", put(update_bill))
        .route("/api/v1/users/:user_id/bills/:bill_id", delete(delete_bill))
        // Bill schedule projection
        .route("/api/v1/users/:user_id/bills/schedule", get(get_bill_schedule))
        // Transaction CRUD routes
        .route("/api/v1/users/:user_id/transactions", post(create_transaction))
        .route("/api/v1/users/:user_id/transactions", get(get_transactions))
        .route(
            "/api/v1/users/:user_id/transactions/:transaction_id",
            get(get_transaction),
        )
        .route(
            "/api/v1/users/:user_id/transactions/:transaction_id",
            put(update_transaction),
        )
        .route(
            "/api/v1/users/:user_id/transactions/:transaction_id",
            delete(delete_transaction),
        )
        // Cash-flow summary
        .route(
            "/api/v1/users/:user_id/transactions/summary",
            get(get_cashflow_summary),
        )
        // Goal CRUD routes
        .route("/api/v1/users/:user_id/goals", post(create_goal))
        .route("/api/v1/users/:user_id/goals", get(get_goals))
        .route("/api/v1/users/:user_id/goals/:goal_id", put(update_goal))
        .route("/api/v1/users/:user_id/goals/:goal_id", delete(delete_goal))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
