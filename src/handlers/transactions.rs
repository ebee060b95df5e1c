use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{Datelike, NaiveDate, Utc};
use common::{CashflowSummary, CategorySpend, ViewMode};
use model::entities::transaction::{self, TransactionKind};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{input_fingerprint, ApiResponse, AppState, CachedData, ErrorResponse, WindowQuery};

/// Request body for creating a new transaction
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateTransactionRequest {
    /// Transaction date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Amount (always positive; `kind` determines the direction)
    pub amount: Decimal,
    /// "income" or "expense"
    pub kind: String,
    /// Vendor or merchant name
    #[validate(length(min = 1, message = "vendor must not be empty"))]
    pub vendor: String,
    /// Budgeting category
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    /// Optional notes
    pub notes: Option<String>,
    /// Account the transaction was booked against
    pub account_id: i32,
}

/// Request body for updating a transaction
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateTransactionRequest {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    /// "income" or "expense"
    pub kind: Option<String>,
    #[validate(length(min = 1, message = "vendor must not be empty"))]
    pub vendor: Option<String>,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
}

/// Transaction response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: String,
    pub vendor: String,
    pub category: String,
    pub notes: Option<String>,
    pub account_id: i32,
    pub owner_id: i32,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            amount: model.amount,
            kind: kind_to_str(model.kind).to_string(),
            vendor: model.vendor,
            category: model.category,
            notes: model.notes,
            account_id: model.account_id,
            owner_id: model.owner_id,
        }
    }
}

fn kind_to_str(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

fn parse_kind(raw: &str) -> Option<TransactionKind> {
    match raw {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        _ => None,
    }
}

fn validation_error(error: String, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Whether a transaction date falls inside the requested viewing window.
fn in_window(date: NaiveDate, today: NaiveDate, view: ViewMode) -> bool {
    match view {
        ViewMode::Month => date.year() == today.year() && date.month() == today.month(),
        ViewMode::Year => date.year() == today.year(),
    }
}

/// Create a new transaction for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/transactions",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_transaction(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateTransactionRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_transaction function");
    debug!(
        "Creating {} transaction of {} at '{}' for owner {}",
        request.kind, request.amount, request.vendor, user_id
    );

    let Some(kind) = parse_kind(&request.kind) else {
        warn!("Rejecting transaction with unknown kind {:?}", request.kind);
        return Err(validation_error(
            format!("Kind must be \"income\" or \"expense\", got {:?}", request.kind),
            "INVALID_KIND",
        ));
    };
    if request.amount < Decimal::ZERO {
        warn!(
            "Rejecting transaction with negative amount {}",
            request.amount
        );
        return Err(validation_error(
            format!("Amount must be non-negative, got {}", request.amount),
            "NEGATIVE_AMOUNT",
        ));
    }

    let new_transaction = transaction::ActiveModel {
        date: Set(request.date),
        amount: Set(request.amount),
        kind: Set(kind),
        vendor: Set(request.vendor.clone()),
        category: Set(request.category.clone()),
        notes: Set(request.notes.clone()),
        account_id: Set(request.account_id),
        owner_id: Set(user_id),
        ..Default::default()
    };

    match new_transaction.insert(&state.db).await {
        Ok(transaction_model) => {
            info!(
                "Transaction created successfully with ID: {} for owner {}",
                transaction_model.id, user_id
            );
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Transaction created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create transaction for owner {}: {}",
                user_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating transaction".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all transactions owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/transactions",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_transactions(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, StatusCode> {
    trace!("Entering get_transactions function for owner {}", user_id);

    match transaction::Entity::find()
        .filter(transaction::Column::OwnerId.eq(user_id))
        .order_by_asc(transaction::Column::Date)
        .all(&state.db)
        .await
    {
        Ok(transactions) => {
            let count = transactions.len();
            debug!("Retrieved {} transactions for owner {}", count, user_id);

            let responses: Vec<TransactionResponse> = transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect();

            let response = ApiResponse {
                data: responses,
                message: "Transactions retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve transactions for owner {}: {}",
                user_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific transaction
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction retrieved successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_transaction(
    Path((user_id, transaction_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TransactionResponse>>, StatusCode> {
    trace!(
        "Entering get_transaction function for transaction {} of owner {}",
        transaction_id, user_id
    );

    match transaction::Entity::find_by_id(transaction_id)
        .filter(transaction::Column::OwnerId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(transaction_model)) => {
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Transaction retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!(
                "Transaction {} not found for owner {}",
                transaction_id, user_id
            );
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve transaction {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a transaction
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_transaction(
    Path((user_id, transaction_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateTransactionRequest>>,
) -> Result<Json<ApiResponse<TransactionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering update_transaction function for transaction {} of owner {}",
        transaction_id, user_id
    );

    let existing = match transaction::Entity::find_by_id(transaction_id)
        .filter(transaction::Column::OwnerId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!(
                "Transaction {} not found for owner {}",
                transaction_id, user_id
            );
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Transaction not found".to_string(),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup transaction {} for owner {}: {}",
                transaction_id, user_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating transaction".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut active: transaction::ActiveModel = existing.into();

    if let Some(date) = request.date {
        active.date = Set(date);
    }
    if let Some(amount) = request.amount {
        if amount < Decimal::ZERO {
            return Err(validation_error(
                format!("Amount must be non-negative, got {}", amount),
                "NEGATIVE_AMOUNT",
            ));
        }
        active.amount = Set(amount);
    }
    if let Some(raw_kind) = request.kind {
        let Some(kind) = parse_kind(&raw_kind) else {
            return Err(validation_error(
                format!("Kind must be \"income\" or \"expense\", got {:?}", raw_kind),
                "INVALID_KIND",
            ));
        };
        active.kind = Set(kind);
    }
    if let Some(vendor) = request.vendor {
        active.vendor = Set(vendor);
    }
    if let Some(category) = request.category {
        active.category = Set(category);
    }
    if let Some(notes) = request.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(account_id) = request.account_id {
        active.account_id = Set(account_id);
    }

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Transaction {} updated successfully", transaction_id);
            let response = ApiResponse {
                data: TransactionResponse::from(updated),
                message: "Transaction updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update transaction {}: {}",
                transaction_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating transaction".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_transaction(
    Path((user_id, transaction_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_transaction function for transaction {} of owner {}",
        transaction_id, user_id
    );

    match transaction::Entity::delete_many()
        .filter(transaction::Column::Id.eq(transaction_id))
        .filter(transaction::Column::OwnerId.eq(user_id))
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Transaction {} deleted successfully", transaction_id);
                let response = ApiResponse {
                    data: format!("Transaction {} deleted", transaction_id),
                    message: "Transaction deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Transaction {} not found for owner {} (no rows affected)",
                    transaction_id, user_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete transaction {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get income/expense totals for a user over a viewing window
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/transactions/summary",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Cash-flow summary computed successfully", body = ApiResponse<CashflowSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_cashflow_summary(
    Path(user_id): Path<i32>,
    Query(query): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CashflowSummary>>, StatusCode> {
    trace!("Entering get_cashflow_summary function for owner {}", user_id);

    let view = query.view.unwrap_or_default();
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());

    let transactions = match transaction::Entity::find()
        .filter(transaction::Column::OwnerId.eq(user_id))
        .all(&state.db)
        .await
    {
        Ok(transactions) => transactions,
        Err(db_error) => {
            error!(
                "Failed to retrieve transactions for owner {}: {}",
                user_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let rows: Vec<(i32, NaiveDate, Decimal, &str)> = transactions
        .iter()
        .map(|t| (t.id, t.date, t.amount, kind_to_str(t.kind)))
        .collect();
    let fingerprint = input_fingerprint(&(user_id, today, view, rows));
    let cache_key = format!("summary_{}_{:016x}", user_id, fingerprint);

    if let Some(CachedData::Summary(cached)) = state.cache.get(&cache_key).await {
        debug!("Summary cache hit for owner {}", user_id);
        let response = ApiResponse {
            data: cached,
            message: "Cash-flow summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();

    for t in transactions
        .iter()
        .filter(|t| in_window(t.date, today, view))
    {
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => {
                expenses += t.amount;
                *by_category.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
            }
        }
    }

    let summary = CashflowSummary {
        as_of: today,
        view,
        income,
        expenses,
        net: income - expenses,
        by_category: by_category
            .into_iter()
            .map(|(category, total)| CategorySpend { category, total })
            .collect(),
    };

    info!(
        "Computed cash-flow summary for owner {}: income {}, expenses {}",
        user_id, summary.income, summary.expenses
    );

    state
        .cache
        .insert(cache_key, CachedData::Summary(summary.clone()))
        .await;

    let response = ApiResponse {
        data: summary,
        message: "Cash-flow summary computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
