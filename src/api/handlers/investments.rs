//! Investment handlers: list with derived valuations, create, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{CreateInvestmentRequest, InvestmentResponse};
use crate::app_state::AppState;
use crate::domain::ItemId;
use crate::error::{ErrorResponse, ServiceError};

/// `GET /investments` — All investment lots with current valuations.
///
/// Derived totals come from the latest recorded price per item; lots
/// whose item has no history carry `null` current values.
///
/// # Errors
///
/// Returns a [`ServiceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/investments",
    tag = "Investments",
    summary = "List investments with valuations",
    responses(
        (status = 200, description = "Investment lots", body = Vec<InvestmentResponse>),
    )
)]
pub async fn list_investments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let investments = state.store.list_investments().await?;

    let item_ids: Vec<i64> = investments.iter().map(|i| i.item_id.as_i64()).collect();
    let latest = state.store.latest_prices(&item_ids).await?;

    let response: Vec<InvestmentResponse> = investments
        .into_iter()
        .map(|investment| {
            let current_price = latest
                .iter()
                .find(|p| p.item_id == investment.item_id.as_i64())
                .map(|p| p.price);
            InvestmentResponse::with_price(investment, current_price)
        })
        .collect();

    Ok(Json(response))
}

/// `POST /investments` — Record a purchase lot.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] on a non-positive quantity
/// or purchase price.
#[utoipa::path(
    post,
    path = "/api/v1/investments",
    tag = "Investments",
    summary = "Record an investment",
    request_body = CreateInvestmentRequest,
    responses(
        (status = 201, description = "Investment created", body = InvestmentResponse),
        (status = 400, description = "Invalid investment attributes", body = ErrorResponse),
    )
)]
pub async fn create_investment(
    State(state): State<AppState>,
    Json(req): Json<CreateInvestmentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    if req.quantity < 1 {
        return Err(ServiceError::InvalidRequest(format!(
            "quantity must be positive, got {}",
            req.quantity
        )));
    }
    if req.purchase_price <= 0.0 {
        return Err(ServiceError::InvalidRequest(format!(
            "purchase_price must be positive, got {}",
            req.purchase_price
        )));
    }

    let item_id = ItemId::new(req.item_id);
    let investment = state
        .store
        .insert_investment(item_id, req.purchase_date, req.purchase_price, req.quantity)
        .await?;

    let current_price = state.store.latest_price(item_id).await?.map(|p| p.price);
    tracing::info!(investment_id = %investment.id, item_id = %item_id, "investment recorded");
    Ok((
        StatusCode::CREATED,
        Json(InvestmentResponse::with_price(investment, current_price)),
    ))
}

/// `DELETE /investments/:id` — Remove an investment lot.
///
/// # Errors
///
/// Returns [`ServiceError::InvestmentNotFound`] if no lot matches.
#[utoipa::path(
    delete,
    path = "/api/v1/investments/{id}",
    tag = "Investments",
    summary = "Delete an investment",
    params(
        ("id" = Uuid, Path, description = "Investment UUID"),
    ),
    responses(
        (status = 204, description = "Investment deleted"),
        (status = 404, description = "Investment not found", body = ErrorResponse),
    )
)]
pub async fn delete_investment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.store.delete_investment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Investment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/investments", get(list_investments).post(create_investment))
        .route("/investments/{id}", delete(delete_investment))
}
