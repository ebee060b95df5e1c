use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use model::entities::goal;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new goal
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateGoalRequest {
    /// Goal title, e.g. "Emergency Fund"
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Target amount to reach
    pub target_amount: Decimal,
    /// Amount already saved (default: 0)
    pub current_amount: Option<Decimal>,
    /// Optional date the goal should be reached by (YYYY-MM-DD)
    pub target_date: Option<NaiveDate>,
}

/// Request body for updating a goal
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

/// Goal response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GoalResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub completed: bool,
    pub owner_id: i32,
}

impl From<goal::Model> for GoalResponse {
    fn from(model: goal::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            target_date: model.target_date,
            completed: model.completed,
            owner_id: model.owner_id,
        }
    }
}

fn negative_amount(field: &str, amount: Decimal) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("{} must be non-negative, got {}", field, amount),
            code: "NEGATIVE_AMOUNT".to_string(),
            success: false,
        }),
    )
}

/// Create a new goal for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/goals",
    tag = "goals",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    request_body = CreateGoalRequest,
    responses(
        (status = 201, description = "Goal created successfully", body = ApiResponse<GoalResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_goal(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateGoalRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<GoalResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_goal function");
    debug!("Creating goal '{}' for owner {}", request.title, user_id);

    if request.target_amount < Decimal::ZERO {
        warn!(
            "Rejecting goal '{}' with negative target amount",
            request.title
        );
        return Err(negative_amount("Target amount", request.target_amount));
    }
    let current_amount = request.current_amount.unwrap_or(Decimal::ZERO);
    if current_amount < Decimal::ZERO {
        warn!(
            "Rejecting goal '{}' with negative current amount",
            request.title
        );
        return Err(negative_amount("Current amount", current_amount));
    }

    let new_goal = goal::ActiveModel {
        title: Set(request.title.clone()),
        description: Set(request.description.clone()),
        target_amount: Set(request.target_amount),
        current_amount: Set(current_amount),
        target_date: Set(request.target_date),
        completed: Set(false),
        owner_id: Set(user_id),
        ..Default::default()
    };

    match new_goal.insert(&state.db).await {
        Ok(goal_model) => {
            info!(
                "Goal created successfully with ID: {}, title: {}",
                goal_model.id, goal_model.title
            );
            let response = ApiResponse {
                data: GoalResponse::from(goal_model),
                message: "Goal created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create goal '{}' for owner {}: {}",
                request.title, user_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating goal".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all goals owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/goals",
    tag = "goals",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Goals retrieved successfully", body = ApiResponse<Vec<GoalResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_goals(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GoalResponse>>>, StatusCode> {
    trace!("Entering get_goals function for owner {}", user_id);

    match goal::Entity::find()
        .filter(goal::Column::OwnerId.eq(user_id))
        .order_by_asc(goal::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(goals) => {
            let goal_count = goals.len();
            debug!("Retrieved {} goals for owner {}", goal_count, user_id);

            let goal_responses: Vec<GoalResponse> =
                goals.into_iter().map(GoalResponse::from).collect();

            let response = ApiResponse {
                data: goal_responses,
                message: "Goals retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve goals for owner {}: {}",
                user_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a goal
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/goals/{goal_id}",
    tag = "goals",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("goal_id" = i32, Path, description = "Goal ID"),
    ),
    request_body = UpdateGoalRequest,
    responses(
        (status = 200, description = "Goal updated successfully", body = ApiResponse<GoalResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Goal not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateGoalRequest>>,
) -> Result<Json<ApiResponse<GoalResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering update_goal function for goal {} of owner {}",
        goal_id, user_id
    );

    let existing_goal = match goal::Entity::find_by_id(goal_id)
        .filter(goal::Column::OwnerId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(goal)) => goal,
        Ok(None) => {
            warn!("Goal {} not found for owner {}", goal_id, user_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Goal not found".to_string(),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup goal {} for owner {}: {}",
                goal_id, user_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating goal".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut goal_active: goal::ActiveModel = existing_goal.into();

    if let Some(title) = request.title {
        debug!("Updating goal title to: {}", title);
        goal_active.title = Set(title);
    }
    if let Some(description) = request.description {
        goal_active.description = Set(Some(description));
    }
    if let Some(target_amount) = request.target_amount {
        if target_amount < Decimal::ZERO {
            return Err(negative_amount("Target amount", target_amount));
        }
        goal_active.target_amount = Set(target_amount);
    }
    if let Some(current_amount) = request.current_amount {
        if current_amount < Decimal::ZERO {
            return Err(negative_amount("Current amount", current_amount));
        }
        goal_active.current_amount = Set(current_amount);
    }
    if let Some(target_date) = request.target_date {
        goal_active.target_date = Set(Some(target_date));
    }
    if let Some(completed) = request.completed {
        debug!("Updating goal completed to: {}", completed);
        goal_active.completed = Set(completed);
    }

    match goal_active.update(&state.db).await {
        Ok(updated_goal) => {
            info!("Goal {} updated successfully", goal_id);
            let response = ApiResponse {
                data: GoalResponse::from(updated_goal),
                message: "Goal updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update goal {}: {}", goal_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating goal".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a goal
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/goals/{goal_id}",
    tag = "goals",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        ("goal_id" = i32, Path, description = "Goal ID"),
    ),
    responses(
        (status = 200, description = "Goal deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Goal not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_goal function for goal {} of owner {}",
        goal_id, user_id
    );

    match goal::Entity::delete_many()
        .filter(goal::Column::Id.eq(goal_id))
        .filter(goal::Column::OwnerId.eq(user_id))
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Goal {} deleted successfully", goal_id);
                let response = ApiResponse {
                    data: format!("Goal {} deleted", goal_id),
                    message: "Goal deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Goal {} not found for owner {} (no rows affected)",
                    goal_id, user_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete goal {}: {}", goal_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
