use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::BillSchedule;
use model::entities::bill;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, error, info, instrument, trace};

use crate::schemas::{input_fingerprint, ApiResponse, AppState, CachedData, WindowQuery};

/// Get the projected bill schedule for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/bills/schedule",
    tag = "bills",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Bill schedule computed successfully", body = ApiResponse<BillSchedule>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_bill_schedule(
    Path(user_id): Path<i32>,
    Query(query): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BillSchedule>>, StatusCode> {
    trace!("Entering get_bill_schedule function for owner {}", user_id);

    let view = query.view.unwrap_or_default();
    // The ambient clock is read only here, at the HTTP boundary; the
    // pipeline itself takes the reference date as an argument.
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    debug!("Computing schedule for owner {} as of {} ({:?})", user_id, today, view);

    // Fetch the owner's bills in a stable order; insertion order is the
    // sequencer's tie-break.
    let bills = match bill::Entity::find()
        .filter(bill::Column::OwnerId.eq(user_id))
        .order_by_asc(bill::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(bills) => bills,
        Err(db_error) => {
            error!(
                "Failed to retrieve bills for owner {}: {}",
                user_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Memo key covers every pipeline input: the exact bill rows, the
    // reference date and the view mode. Editing any bill changes the key.
    let rows: Vec<(i32, &str, &str, rust_decimal::Decimal)> = bills
        .iter()
        .map(|b| (b.id, b.name.as_str(), b.due_date.as_str(), b.amount))
        .collect();
    let fingerprint = input_fingerprint(&(user_id, today, view, rows));
    let cache_key = format!("schedule_{}_{:016x}", user_id, fingerprint);

    if let Some(CachedData::Schedule(cached)) = state.cache.get(&cache_key).await {
        debug!("Schedule cache hit for owner {}", user_id);
        let response = ApiResponse {
            data: cached,
            message: "Bill schedule retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let bill_schedule = schedule::build_schedule(&bills, today, view);
    info!(
        "Computed schedule for owner {}: {} of {} bills retained",
        user_id,
        bill_schedule.bills.len(),
        bills.len()
    );

    state
        .cache
        .insert(cache_key, CachedData::Schedule(bill_schedule.clone()))
        .await;

    let response = ApiResponse {
        data: bill_schedule,
        message: "Bill schedule computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
