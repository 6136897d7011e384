use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::orders;
use crate::error::AppError;
use crate::models::batch::OptimizeResult;
use crate::models::order::{NewOrder, Order, OrderStatus};
use crate::models::zone::Zone;
use crate::state::AppState;
use crate::store::OrderFilter;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/optimize", get(optimize))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", patch(update_order_status))
        .route("/zones", get(list_zones))
}

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    pub zone: Option<Zone>,
    pub status: Option<OrderStatus>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(payload) = payload?;
    let order = orders::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<Json<Vec<Order>>, AppError> {
    let Query(query) = query?;
    let filter = OrderFilter {
        zone: query.zone,
        status: query.status,
    };
    Ok(Json(orders::list_orders(&state, filter).await?))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Order>, AppError> {
    let Path(id) = id?;
    Ok(Json(orders::get_order(&state, id).await?))
}

async fn update_order_status(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(orders::update_status(&state, id, payload.status).await?))
}

async fn optimize(State(state): State<Arc<AppState>>) -> Result<Json<OptimizeResult>, AppError> {
    Ok(Json(orders::optimize(&state).await?))
}

async fn list_zones() -> Json<[Zone; 5]> {
    Json(Zone::ALL)
}
