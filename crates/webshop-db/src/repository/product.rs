//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Batch lookup by id for the availability gate and pricing
//!
//! ## Batch Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create-order [p1 ×2, p2 ×50, p1 ×1]                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get_many([p1, p2, p1])                                                 │
//! │       │  SELECT ... WHERE id IN (?, ?, ?)   ← one round trip            │
//! │       ▼                                                                 │
//! │  HashMap { p1 → Product, p2 → Product }                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  availability::ensure_available / pricing::price_line_items             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use webshop_core::Product;

const PRODUCT_COLUMNS: &str =
    "id, code, name, price_cents, description, is_available, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_by_id("uuid-here").await?;
/// let catalog = repo.get_many(&ids).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Loads every product whose id appears in `ids`, keyed by id.
    ///
    /// Duplicate ids are fine. Ids with no product are simply absent from
    /// the map.
    pub async fn get_many(&self, ids: &[String]) -> DbResult<HashMap<String, Product>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(requested = ids.len(), found = products.len(), "Loaded products by id");

        Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }

    /// Inserts a new product.
    ///
    /// Fails with `UniqueViolation` when the code is already taken.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, code = %product.code, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, code, name, price_cents, description, is_available,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(&product.description)
        .bind(product.is_available)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites a product's fields.
    ///
    /// ## Returns
    /// `false` when no product has this id.
    pub async fn update(&self, product: &Product) -> DbResult<bool> {
        debug!(id = %product.id, code = %product.code, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                code = ?2,
                name = ?3,
                price_cents = ?4,
                description = ?5,
                is_available = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(&product.description)
        .bind(product.is_available)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// `false` when no product has this id. Fails with
    /// `ForeignKeyViolation` while a line item still references it.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    async fn setup_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn product(code: &str, price_cents: i64, is_available: bool) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            name: format!("Product {}", code),
            price_cents,
            description: Some("demo".to_string()),
            is_available,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup_db().await;
        let kbd = product("KBD-000001", 14999, true);

        db.products().insert(&kbd).await.unwrap();

        let loaded = db.products().get_by_id(&kbd.id).await.unwrap().unwrap();
        assert_eq!(loaded.code, "KBD-000001");
        assert_eq!(loaded.price_cents, 14999);
        assert!(loaded.is_available);
        assert_eq!(loaded.description.as_deref(), Some("demo"));
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = setup_db().await;
        db.products().insert(&product("KBD-000001", 100, true)).await.unwrap();

        let err = db
            .products()
            .insert(&product("KBD-000001", 200, true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_many() {
        let db = setup_db().await;
        let a = product("AAAAAAAAAA", 100, true);
        let b = product("BBBBBBBBBB", 200, false);
        db.products().insert(&a).await.unwrap();
        db.products().insert(&b).await.unwrap();

        let ids = vec![a.id.clone(), b.id.clone(), a.id.clone(), "ghost".to_string()];
        let found = db.products().get_many(&ids).await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[&a.id].is_available);
        assert!(!found[&b.id].is_available);
        assert!(!found.contains_key("ghost"));

        assert!(db.products().get_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = setup_db().await;
        let mut p = product("CBL-USB-C1", 199, true);
        db.products().insert(&p).await.unwrap();

        p.price_cents = 299;
        p.is_available = false;
        assert!(db.products().update(&p).await.unwrap());

        let loaded = db.products().get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(loaded.price_cents, 299);
        assert!(!loaded.is_available);

        assert!(db.products().delete(&p.id).await.unwrap());
        assert!(!db.products().delete(&p.id).await.unwrap());
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
