use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use model::entities::account::{self, AccountKind};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new account
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateAccountRequest {
    /// Account name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Account kind: bank, credit, cash, savings, investment or other
    pub kind: String,
    /// Opening balance (default: 0)
    pub balance: Option<Decimal>,
    /// Financial institution name
    pub institution: Option<String>,
}

/// Request body for updating an account
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateAccountRequest {
    /// Account name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// Account kind: bank, credit, cash, savings, investment or other
    pub kind: Option<String>,
    /// Current balance
    pub balance: Option<Decimal>,
    /// Financial institution name
    pub institution: Option<String>,
}

/// Account response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub balance: Decimal,
    pub institution: Option<String>,
    pub owner_id: i32,
}

impl From<account::Model> for AccountResponse {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: kind_to_str(model.kind).to_string(),
            balance: model.balance,
            institution: model.institution,
            owner_id: model.owner_id,
        }
    }
}

fn kind_to_str(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::Bank => "bank",
        AccountKind::Credit => "credit",
        AccountKind::Cash => "cash",
        AccountKind::Savings => "savings",
        AccountKind::Investment => "investment",
        AccountKind::Other => "other",
    }
}

fn parse_kind(raw: &str) -> Option<AccountKind> {
    match raw {
        "bank" => Some(AccountKind::Bank),
        "credit" => Some(AccountKind::Credit),
        "cash" => Some(AccountKind::Cash),
        "savings" => Some(AccountKind::Savings),
        "investment" => Some(AccountKind::Investment),
        "other" => Some(AccountKind::Other),
        _ => None,
    }
}

fn invalid_kind(raw: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!(
                "Kind must be one of bank, credit, cash, savings, investment, other; got {:?}",
                raw
            ),
            code: "INVALID_KIND".to_string(),
            success: false,
        }),
    )
}

/// Create a new account for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/accounts",
    tag = "accounts",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_account(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateAccountRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_account function");
    debug!(
        "Creating {} account '{}' for owner {}",
        request.kind, request.name, user_id
    );

    let Some(kind) = parse_kind(&request.kind) else {
        warn!("Rejecting account with unknown kind {:?}", request.kind);
        return Err(invalid_kind(&request.kind));
    };

    let new_account = account::ActiveModel {
        name: Set(request.name.clone()),
        kind: Set(kind),
        balance: Set(request.balance.unwrap_or(Decimal::ZERO)),
        institution: Set(request.institution.clone()),
        owner_id: Set(user_id),
        ..Default::default()
    };

    match new_account.insert(&state.db).await {
        Ok(account_model) => {
            info!(
                "Account created successfully with ID: {}, name: {}",
                account_model.id, account_model.name
            );
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create account '{}' for owner {}: {}",
                request.name, user_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating account".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all accounts owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/accounts",
    tag = "accounts",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_accounts(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, StatusCode> {
    trace!("Entering get_accounts function for owner {}", user_id);

    match account::Entity::find()
        .filter(account::Column::OwnerId.eq(user_id))
        .order_by_asc(account::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(accounts) => {
            let account_count = accounts.len();
            debug!("Retrieved {} accounts for owner {}", account_count, user_id);

            let account_responses: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();

            let response = ApiResponse {
                data: account_responses,
                message: "Accounts retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve accounts for owner {}: {}",
                user_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific account
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/accounts/{account_id}",
    tag = "accounts",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account(
    Path((user_id, account_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusCode> {
    trace!(
        "Entering get_account function for account {} of owner {}",
        account_id, user_id
    );

    match account::Entity::find_by_id(account_id)
        .filter(account::Column::OwnerId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(account_model)) => {
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Account {} not found for owner {}", account_id, user_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve account {}: {}", account_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update an account
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/accounts/{account_id}",
    tag = "accounts",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_account(
    Path((user_id, account_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateAccountRequest>>,
) -> Result<Json<ApiResponse<AccountResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering update_account function for account {} of owner {}",
        account_id, user_id
    );

    let existing_account = match account::Entity::find_by_id(account_id)
        .filter(account::Column::OwnerId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!("Account {} not found for owner {}", account_id, user_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Account not found".to_string(),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup account {} for owner {}: {}",
                account_id, user_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating account".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut account_active: account::ActiveModel = existing_account.into();

    if let Some(name) = request.name {
        debug!("Updating account name to: {}", name);
        account_active.name = Set(name);
    }
    if let Some(raw_kind) = request.kind {
        let Some(kind) = parse_kind(&raw_kind) else {
            warn!("Rejecting account update with unknown kind {:?}", raw_kind);
            return Err(invalid_kind(&raw_kind));
        };
        account_active.kind = Set(kind);
    }
    if let Some(balance) = request.balance {
        debug!("Updating account balance to: {}", balance);
        account_active.balance = Set(balance);
    }
    if let Some(institution) = request.institution {
        account_active.institution = Set(Some(institution));
    }

    match account_active.update(&state.db).await {
        Ok(updated_account) => {
            info!("Account {} updated successfully", account_id);
            let response = ApiResponse {
                data: AccountResponse::from(updated_account),
                message: "Account updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update account {}: {}", account_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating account".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/accounts/{account_id}",
    tag = "accounts",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_account(
    Path((user_id, account_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_account function for account {} of owner {}",
        account_id, user_id
    );

    match account::Entity::delete_many()
        .filter(account::Column::Id.eq(account_id))
        .filter(account::Column::OwnerId.eq(user_id))
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Account {} deleted successfully", account_id);
                let response = ApiResponse {
                    data: format!("Account {} deleted", account_id),
                    message: "Account deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Account {} not found for owner {} (no rows affected)",
                    account_id, user_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete account {}: {}", account_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
