//! Customer CRUD.

use chrono::Utc;
use uuid::Uuid;
use webshop_core::validation::{validate_email, validate_person_name, validate_uuid};
use webshop_core::{CoreError, Customer};
use webshop_db::Database;

use crate::api_types::{CustomerRequest, CustomerResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub struct CustomerService<'a> {
    db: &'a Database,
}

impl<'a> CustomerService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        CustomerService { db: &state.db }
    }

    pub async fn get(&self, id: &str) -> ApiResult<CustomerResponse> {
        validate_uuid("id", id)?;

        let customer = self
            .db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;

        Ok(customer.into())
    }

    pub async fn create(&self, req: CustomerRequest) -> ApiResult<CustomerResponse> {
        validate(&req)?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.db.customers().insert(&customer).await?;
        Ok(customer.into())
    }

    /// Overwrites a customer. An unknown id is reported as malformed data,
    /// not as a missing resource.
    pub async fn update(&self, id: &str, req: CustomerRequest) -> ApiResult<CustomerResponse> {
        validate_uuid("id", id)?;
        validate(&req)?;

        let Some(mut customer) = self.db.customers().get_by_id(id).await? else {
            return Err(ApiError::validation("Customer data is malformed"));
        };

        customer.first_name = req.first_name.trim().to_string();
        customer.last_name = req.last_name.trim().to_string();
        customer.email = req.email.trim().to_string();
        customer.updated_at = Utc::now();

        if !self.db.customers().update(&customer).await? {
            return Err(ApiError::validation("Customer data is malformed"));
        }
        Ok(customer.into())
    }

    /// Deletes a customer. Missing customers are a no-op.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.db.customers().delete(id).await?;
        Ok(())
    }
}

fn validate(req: &CustomerRequest) -> ApiResult<()> {
    validate_person_name("firstName", &req.first_name)?;
    validate_person_name("lastName", &req.last_name)?;
    validate_email(req.email.trim())?;
    Ok(())
}
