use std::time::Instant;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::info;
use uuid::Uuid;

use crate::engine::batching;
use crate::error::AppError;
use crate::models::batch::OptimizeResult;
use crate::models::order::{NewOrder, Order, OrderStatus};
use crate::state::AppState;
use crate::store::OrderFilter;

pub async fn create_order(state: &AppState, input: NewOrder) -> Result<Order, AppError> {
    let customer = required_text("customer", input.customer)?;
    let dispensary = required_text("dispensary", input.dispensary)?;
    let zone = input
        .zone
        .ok_or_else(|| AppError::Validation("zone is required".to_string()))?;

    let now = now_micros();
    let order = Order {
        id: Uuid::new_v4(),
        customer,
        dispensary,
        zone,
        status: OrderStatus::Placed,
        created_at: now,
        updated_at: now,
    };

    state.store.insert(order.clone()).await?;
    state.metrics.orders_created_total.inc();

    info!(order_id = %order.id, zone = %order.zone, "order placed");
    Ok(order)
}

pub async fn list_orders(state: &AppState, filter: OrderFilter) -> Result<Vec<Order>, AppError> {
    state.store.list(filter).await
}

pub async fn get_order(state: &AppState, id: Uuid) -> Result<Order, AppError> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))
}

/// Any status may replace any other; transitions are not checked.
pub async fn update_status(
    state: &AppState,
    id: Uuid,
    status: OrderStatus,
) -> Result<Order, AppError> {
    let order = state
        .store
        .update_status(id, status, now_micros())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    state
        .metrics
        .status_updates_total
        .with_label_values(&[status.as_str()])
        .inc();

    info!(order_id = %id, status = %status, "order status updated");
    Ok(order)
}

pub async fn optimize(state: &AppState) -> Result<OptimizeResult, AppError> {
    let start = Instant::now();

    let placed = state
        .store
        .list(OrderFilter {
            zone: None,
            status: Some(OrderStatus::Placed),
        })
        .await?;
    let result = batching::optimize(&placed);

    let batched: usize = result.batches.iter().map(|batch| batch.order_count).sum();
    state.metrics.optimize_runs_total.inc();
    state
        .metrics
        .optimize_latency_seconds
        .observe(start.elapsed().as_secs_f64());
    state.metrics.batched_orders.set(batched as i64);
    state
        .metrics
        .unbatched_orders
        .set(result.unbatched_count as i64);

    info!(
        batches = result.batches.len(),
        batched_orders = batched,
        unbatched_orders = result.unbatched_count,
        "batching pass computed"
    );

    Ok(result)
}

/// Current time at the microsecond precision Postgres keeps, so a stored
/// order reads back identical to the one returned on write.
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn required_text(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value.map(|raw| raw.trim().to_string()) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}
