use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::store::{OrderFilter, OrderStore};

struct StoredOrder {
    seq: u64,
    order: Order,
}

/// In-process store. The insertion sequence breaks ties between orders
/// created within the same clock tick.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: DashMap<Uuid, StoredOrder>,
    next_seq: AtomicU64,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<(), AppError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.orders.insert(order.id, StoredOrder { seq, order });
        Ok(())
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, AppError> {
        let mut matching: Vec<(DateTime<Utc>, u64, Order)> = self
            .orders
            .iter()
            .filter(|entry| filter.matches(&entry.value().order))
            .map(|entry| {
                let stored = entry.value();
                (stored.order.created_at, stored.seq, stored.order.clone())
            })
            .collect();

        matching.sort_by_key(|(created_at, seq, _)| (*created_at, *seq));
        Ok(matching.into_iter().map(|(_, _, order)| order).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.orders.get(&id).map(|entry| entry.value().order.clone()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, AppError> {
        let Some(mut entry) = self.orders.get_mut(&id) else {
            return Ok(None);
        };

        entry.order.status = status;
        entry.order.updated_at = updated_at;
        Ok(Some(entry.order.clone()))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.orders.len())
    }
}
