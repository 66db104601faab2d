//! Product CRUD.

use chrono::Utc;
use uuid::Uuid;
use webshop_core::validation::{
    validate_price_cents, validate_product_code, validate_product_name, validate_uuid,
};
use webshop_core::{CoreError, Product};
use webshop_db::Database;

use crate::api_types::{ProductRequest, ProductResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub struct ProductService<'a> {
    db: &'a Database,
}

impl<'a> ProductService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        ProductService { db: &state.db }
    }

    pub async fn get(&self, id: &str) -> ApiResult<ProductResponse> {
        validate_uuid("id", id)?;

        let product = self
            .db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        Ok(product.into())
    }

    /// Creates a product. A taken code is a conflict.
    pub async fn create(&self, req: ProductRequest) -> ApiResult<ProductResponse> {
        validate(&req)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            code: req.code,
            name: req.name.trim().to_string(),
            price_cents: req.price_cents,
            description: req.description,
            is_available: req.is_available,
            created_at: now,
            updated_at: now,
        };

        self.db.products().insert(&product).await?;
        Ok(product.into())
    }

    /// Overwrites a product. An unknown id is reported as malformed data.
    ///
    /// Price changes never touch submitted orders; their totals are stored.
    pub async fn update(&self, id: &str, req: ProductRequest) -> ApiResult<ProductResponse> {
        validate_uuid("id", id)?;
        validate(&req)?;

        let Some(mut product) = self.db.products().get_by_id(id).await? else {
            return Err(ApiError::validation("Product data is malformed"));
        };

        product.code = req.code;
        product.name = req.name.trim().to_string();
        product.price_cents = req.price_cents;
        product.description = req.description;
        product.is_available = req.is_available;
        product.updated_at = Utc::now();

        if !self.db.products().update(&product).await? {
            return Err(ApiError::validation("Product data is malformed"));
        }
        Ok(product.into())
    }

    /// Deletes a product. Missing products are a no-op; products still on
    /// an order are a conflict.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.db.products().delete(id).await?;
        Ok(())
    }
}

fn validate(req: &ProductRequest) -> ApiResult<()> {
    validate_product_code(&req.code)?;
    validate_product_name(&req.name)?;
    validate_price_cents(req.price_cents)?;
    Ok(())
}
