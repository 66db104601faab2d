//! # Customer Repository
//!
//! Database operations for customers. Plain CRUD; the only rule enforced
//! here is the foreign key from `orders.customer_id`, which blocks deleting
//! a customer who still owns orders.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use webshop_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, email, created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, first_name, last_name, email, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites a customer's fields.
    ///
    /// ## Returns
    /// `false` when no customer has this id.
    pub async fn update(&self, customer: &Customer) -> DbResult<bool> {
        debug!(id = %customer.id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                first_name = ?2,
                last_name = ?3,
                email = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a customer.
    ///
    /// ## Returns
    /// `false` when no customer has this id. Fails with
    /// `ForeignKeyViolation` if the customer still owns orders.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    async fn setup_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn customer(first: &str) -> Customer {
        let now = Utc::now();
        Customer {
            id: Uuid::new_v4().to_string(),
            first_name: first.to_string(),
            last_name: "Horvat".to_string(),
            email: format!("{}@example.hr", first.to_lowercase()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup_db().await;
        let ana = customer("Ana");

        db.customers().insert(&ana).await.unwrap();

        let loaded = db.customers().get_by_id(&ana.id).await.unwrap().unwrap();
        assert_eq!(loaded.first_name, "Ana");
        assert_eq!(loaded.email, "ana@example.hr");
        assert_eq!(db.customers().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = setup_db().await;
        assert!(db.customers().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let db = setup_db().await;
        let mut ana = customer("Ana");
        db.customers().insert(&ana).await.unwrap();

        ana.last_name = "Kovač".to_string();
        assert!(db.customers().update(&ana).await.unwrap());

        let loaded = db.customers().get_by_id(&ana.id).await.unwrap().unwrap();
        assert_eq!(loaded.last_name, "Kovač");

        let ghost = customer("Ghost");
        assert!(!db.customers().update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let ana = customer("Ana");
        db.customers().insert(&ana).await.unwrap();

        assert!(db.customers().delete(&ana.id).await.unwrap());
        assert!(!db.customers().delete(&ana.id).await.unwrap());
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }
}
