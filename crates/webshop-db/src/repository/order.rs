//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Order Lifecycle in SQL
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE DRAFT                                                        │
//! │     └── create_with_items() → INSERT order + items (one transaction)    │
//! │                                                                         │
//! │  2. REPLACE ITEMS (draft only)                                          │
//! │     └── replace_items() → guard status, DELETE items, INSERT items      │
//! │                                                                         │
//! │  3. SUBMIT                                                              │
//! │     └── submit() → UPDATE ... WHERE id = ? AND status = 'draft'         │
//! │         0 rows affected = someone else submitted first                  │
//! │                                                                         │
//! │  4. DELETE                                                              │
//! │     └── delete() → DELETE items, DELETE order (one transaction)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Column
//! `status` is read as plain TEXT and parsed with `OrderStatus::from_str`,
//! so a value written by some other tool surfaces as
//! `CoreError::UnknownOrderStatus` instead of a decode failure.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use webshop_core::{Order, OrderLineItem, OrderStatus, OrderTotals};

/// Raw `orders` row before the status is parsed.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    status: String,
    total_local_cents: Option<i64>,
    total_reference_cents: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            status: row.status.parse::<OrderStatus>()?,
            id: row.id,
            customer_id: row.customer_id,
            total_local_cents: row.total_local_cents,
            total_reference_cents: row.total_reference_cents,
            created_at: row.created_at,
            updated_at: row.updated_at,
            submitted_at: row.submitted_at,
        })
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order found
    /// * `Ok(None)` - Order not found
    /// * `Err(DbError::Domain(UnknownOrderStatus))` - Stored status is unknown
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id, customer_id, status,
                total_local_cents, total_reference_cents,
                created_at, updated_at, submitted_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Gets all line items of an order, oldest first.
    pub async fn items(&self, order_id: &str) -> DbResult<Vec<OrderLineItem>> {
        let items = sqlx::query_as::<_, OrderLineItem>(
            r#"
            SELECT id, order_id, product_id, quantity, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at, rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new order together with its line items.
    ///
    /// Either everything is written or nothing is.
    pub async fn create_with_items(&self, order: &Order, items: &[OrderLineItem]) -> DbResult<()> {
        debug!(order_id = %order.id, customer_id = %order.customer_id, items = items.len(), "Creating order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, status,
                total_local_cents, total_reference_cents,
                created_at, updated_at, submitted_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.status.as_str())
        .bind(order.total_local_cents)
        .bind(order.total_reference_cents)
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.submitted_at)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, items).await?;

        tx.commit().await?;

        info!(order_id = %order.id, "Order created");
        Ok(())
    }

    /// Replaces the full line-item set of a draft order.
    ///
    /// ## Returns
    /// `false` (and nothing changes) if the order is missing or no longer
    /// a draft when the transaction starts writing.
    pub async fn replace_items(&self, order_id: &str, items: &[OrderLineItem]) -> DbResult<bool> {
        debug!(order_id = %order_id, items = items.len(), "Replacing order items");

        let mut tx = self.pool.begin().await?;

        // Touching the row first takes the write lock and re-checks status.
        let guarded = sqlx::query(
            r#"
            UPDATE orders SET updated_at = ?2
            WHERE id = ?1 AND status = 'draft'
            "#,
        )
        .bind(order_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if guarded.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, items).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Marks a draft order as submitted with its final totals.
    ///
    /// ## Returns
    /// `false` if the order is missing or was already submitted. The
    /// stored totals of a submitted order are never overwritten.
    pub async fn submit(
        &self,
        order_id: &str,
        totals: OrderTotals,
        at: DateTime<Utc>,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = 'submitted',
                total_local_cents = ?2,
                total_reference_cents = ?3,
                submitted_at = ?4,
                updated_at = ?4
            WHERE id = ?1 AND status = 'draft'
            "#,
        )
        .bind(order_id)
        .bind(totals.local.cents())
        .bind(totals.reference.cents())
        .bind(at)
        .execute(&self.pool)
        .await?;

        let submitted = result.rows_affected() > 0;
        if submitted {
            info!(
                order_id = %order_id,
                total_local = %totals.local,
                total_reference = %totals.reference,
                "Order submitted"
            );
        }
        Ok(submitted)
    }

    /// Deletes an order and its line items.
    ///
    /// ## Returns
    /// `false` when the order did not exist. Its line items are still
    /// looked up and removed, which for a missing order is a no-op.
    pub async fn delete(&self, order_id: &str) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let removed_items = sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed_order = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!(order_id = %order_id, removed_items, removed_order, "Deleted order");
        Ok(removed_order > 0)
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_items(tx: &mut Transaction<'_, Sqlite>, items: &[OrderLineItem]) -> DbResult<()> {
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.id)
        .bind(&item.order_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
