use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::store::{OrderFilter, OrderStore};

const CREATE_ORDERS_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS orders ( \
        seq BIGSERIAL NOT NULL, \
        id UUID PRIMARY KEY, \
        customer TEXT NOT NULL, \
        dispensary TEXT NOT NULL, \
        zone TEXT NOT NULL, \
        status TEXT NOT NULL, \
        created_at TIMESTAMPTZ NOT NULL, \
        updated_at TIMESTAMPTZ NOT NULL \
    )";

const ORDER_COLUMNS: &str = "id, customer, dispensary, zone, status, created_at, updated_at";

/// Postgres-backed store. Zone and status are kept as their wire names.
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::query(CREATE_ORDERS_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer: String,
    dispensary: String,
    zone: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            customer: row.customer,
            dispensary: row.dispensary,
            zone: row.zone.parse().map_err(AppError::Store)?,
            status: row.status.parse().map_err(AppError::Store)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, order: Order) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO orders (id, customer, dispensary, zone, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(order.id)
        .bind(&order.customer)
        .bind(&order.dispensary)
        .bind(order.zone.as_str())
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, AppError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE ($1::text IS NULL OR zone = $1) \
               AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at ASC, seq ASC"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(filter.zone.map(|zone| zone.as_str()))
            .bind(filter.status.map(|status| status.as_str()))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, AppError> {
        let sql = format!(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        );

        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn count(&self) -> Result<usize, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as usize)
    }
}
