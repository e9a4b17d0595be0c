//! Item catalog handlers: create and list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CreateItemRequest, ItemResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ServiceError};

/// Validates an optional wear bound lies in `[0, 1]`.
fn validate_float(value: Option<f64>, field: &str) -> Result<(), ServiceError> {
    if let Some(v) = value
        && !(0.0..=1.0).contains(&v)
    {
        return Err(ServiceError::InvalidRequest(format!(
            "{field} must be within [0, 1], got {v}"
        )));
    }
    Ok(())
}

/// `POST /items` — Register a tracked item.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] on an empty name or an
/// out-of-range wear bound.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "Items",
    summary = "Register a tracked item",
    description = "Adds an item definition to the catalog. Items without a def_index or wear range are stored but skipped by price updates.",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid item attributes", body = ErrorResponse),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    if req.def_name.trim().is_empty() {
        return Err(ServiceError::InvalidRequest(
            "def_name must not be empty".to_string(),
        ));
    }
    validate_float(req.min_float, "min_float")?;
    validate_float(req.max_float, "max_float")?;
    if let (Some(min), Some(max)) = (req.min_float, req.max_float)
        && min > max
    {
        return Err(ServiceError::InvalidRequest(format!(
            "min_float {min} exceeds max_float {max}"
        )));
    }

    let item = state.store.insert_item(&req.into_new_item()).await?;
    tracing::info!(item = %item.label(), "item registered");
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// `GET /items` — List tracked items, newest first.
///
/// # Errors
///
/// Returns a [`ServiceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "Items",
    summary = "List tracked items",
    responses(
        (status = 200, description = "Tracked items", body = Vec<ItemResponse>),
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.store.load_items().await?;
    let response: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
    Ok(Json(response))
}

/// Item catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/items", post(create_item).get(list_items))
}
