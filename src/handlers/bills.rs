use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use model::entities::bill;
use rust_decimal::Decimal;
use schedule::normalize::normalize_date;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new bill
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateBillRequest {
    /// Bill name, e.g. "Rent"
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Nominal due date: a YYYY-MM-DD calendar date or a full timestamp
    pub due_date: String,
    /// Amount due per occurrence (non-negative)
    pub amount: Decimal,
}

/// Request body for updating a bill
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateBillRequest {
    /// Bill name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// Nominal due date: a YYYY-MM-DD calendar date or a full timestamp
    pub due_date: Option<String>,
    /// Amount due per occurrence (non-negative)
    pub amount: Option<Decimal>,
}

/// Bill response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillResponse {
    pub id: i32,
    pub name: String,
    pub due_date: String,
    pub amount: Decimal,
    pub owner_id: i32,
}

impl From<bill::Model> for BillResponse {
    fn from(model: bill::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            due_date: model.due_date,
            amount: model.amount,
            owner_id: model.owner_id,
        }
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

/// Create a new bill for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/bills",
    tag = "bills",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill created successfully", body = ApiResponse<BillResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_bill(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateBillRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<BillResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_bill function");
    debug!(
        "Creating bill '{}' due {} for owner {}",
        request.name, request.due_date, user_id
    );

    // The stored value stays raw; it only has to normalize to a real date.
    if let Err(reason) = normalize_date(&request.due_date) {
        warn!(
            "Rejecting bill '{}' with invalid due date {:?}: {}",
            request.name, request.due_date, reason
        );
        return Err(validation_error(
            format!("Invalid due date {:?}: {}", request.due_date, reason),
            "INVALID_DUE_DATE",
        ));
    }
    if request.amount < Decimal::ZERO {
        warn!(
            "Rejecting bill '{}' with negative amount {}",
            request.name, request.amount
        );
        return Err(validation_error(
            format!("Amount must be non-negative, got {}", request.amount),
            "NEGATIVE_AMOUNT",
        ));
    }

    let new_bill = bill::ActiveModel {
        name: Set(request.name.clone()),
        due_date: Set(request.due_date.clone()),
        amount: Set(request.amount),
        owner_id: Set(user_id),
        ..Default::default()
    };

    match new_bill.insert(&state.db).await {
        Ok(bill_model) => {
            info!(
                "Bill created successfully with ID: {}, name: {}, owner: {}",
                bill_model.id, bill_model.name, bill_model.owner_id
            );
            let response = ApiResponse {
                data: BillResponse::from(bill_model),
                message: "Bill created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create bill '{}' for owner {}: {}",
                request.name, user_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating bill".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all bills owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/bills",
    tag = "bills",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Bills retrieved successfully", body = ApiResponse<Vec<BillResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_bills(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BillResponse>>>, StatusCode> {
    trace!("Entering get_bills function for owner {}", user_id);

    match bill::Entity::find()
        .filter(bill::Column::OwnerId.eq(user_id))
        .order_by_asc(bill::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(bills) => {
            let bill_count = bills.len();
            debug!("Retrieved {} bills for owner {}", bill_count, user_id);

            let bill_responses: Vec<BillResponse> =
                bills.into_iter().map(BillResponse::from).collect();

            info!(
                "Successfully retrieved {} bills for owner {}",
                bill_count, user_id
            );
            let response = ApiResponse {
                data: bill_responses,
                message: "Bills retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve bills for owner {}: {}",
                user_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a bill
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/bills/{bill_id}",
    tag = "bills",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("bill_id" = i32, Path, description = "Bill ID"),
    ),
    request_body = UpdateBillRequest,
    responses(
        (status = 200, description = "Bill updated successfully", body = ApiResponse<BillResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_bill(
    Path((user_id, bill_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateBillRequest>>,
) -> Result<Json<ApiResponse<BillResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering update_bill function for bill {} of owner {}",
        bill_id, user_id
    );

    // A bill belonging to another user is indistinguishable from a missing one.
    let existing_bill = match bill::Entity::find_by_id(bill_id)
        .filter(bill::Column::OwnerId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(bill)) => bill,
        Ok(None) => {
            warn!("Bill {} not found for owner {}", bill_id, user_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Bill not found".to_string(),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup bill {} for owner {}: {}",
                bill_id, user_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating bill".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut bill_active: bill::ActiveModel = existing_bill.into();

    if let Some(name) = request.name {
        debug!("Updating bill name to: {}", name);
        bill_active.name = Set(name);
    }
    if let Some(due_date) = request.due_date {
        if let Err(reason) = normalize_date(&due_date) {
            warn!(
                "Rejecting update of bill {} with invalid due date {:?}: {}",
                bill_id, due_date, reason
            );
            return Err(validation_error(
                format!("Invalid due date {:?}: {}", due_date, reason),
                "INVALID_DUE_DATE",
            ));
        }
        debug!("Updating bill due date to: {}", due_date);
        bill_active.due_date = Set(due_date);
    }
    if let Some(amount) = request.amount {
        if amount < Decimal::ZERO {
            warn!(
                "Rejecting update of bill {} with negative amount {}",
                bill_id, amount
            );
            return Err(validation_error(
                format!("Amount must be non-negative, got {}", amount),
                "NEGATIVE_AMOUNT",
            ));
        }
        debug!("Updating bill amount to: {}", amount);
        bill_active.amount = Set(amount);
    }

    match bill_active.update(&state.db).await {
        Ok(updated_bill) => {
            info!("Bill {} updated successfully", bill_id);
            let response = ApiResponse {
                data: BillResponse::from(updated_bill),
                message: "Bill updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update bill {}: {}", bill_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating bill".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a bill
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/bills/{bill_id}",
    tag = "bills",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("bill_id" = i32, Path, description = "Bill ID"),
    ),
    responses(
        (status = 200, description = "Bill deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_bill(
    Path((user_id, bill_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_bill function for bill {} of owner {}",
        bill_id, user_id
    );

    match bill::Entity::delete_many()
        .filter(bill::Column::Id.eq(bill_id))
        .filter(bill::Column::OwnerId.eq(user_id))
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Bill {} deleted successfully", bill_id);
                let response = ApiResponse {
                    data: format!("Bill {} deleted", bill_id),
                    message: "Bill deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Bill {} not found for owner {} (no rows affected)",
                    bill_id, user_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete bill {}: {}", bill_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
