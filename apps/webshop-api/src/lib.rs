//! # Webshop API
//!
//! REST server for customers, products and orders.
//!
//! ## Module Structure
//! ```text
//! webshop-api
//! ├── config     - AppConfig (defaults → TOML → env)
//! ├── error      - ApiError and its HTTP mapping
//! ├── state      - AppState shared by every handler
//! ├── api_types  - Request/response bodies
//! ├── routes     - Router and thin handlers
//! └── services   - Order lifecycle, customer and product CRUD, health
//! ```

pub mod api_types;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
