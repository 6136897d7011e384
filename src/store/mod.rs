pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::models::zone::Zone;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

/// Optional constraints applied when listing orders. Empty matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub zone: Option<Zone>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.zone.is_none_or(|zone| order.zone == zone)
            && self.status.is_none_or(|status| order.status == status)
    }
}

/// Flat record store for orders. Listings come back oldest first.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> Result<(), AppError>;

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError>;

    /// Overwrites the status of an existing order. Returns `None` and leaves
    /// the store untouched when `id` is unknown.
    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, AppError>;

    async fn count(&self) -> Result<usize, AppError>;
}
