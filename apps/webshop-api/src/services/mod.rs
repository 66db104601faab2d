//! Service layer.
//!
//! Handlers in `routes` stay thin; everything that touches the store or the
//! rate provider lives here.

pub mod customer_service;
pub mod health_service;
pub mod order_service;
pub mod product_service;

pub use customer_service::CustomerService;
pub use order_service::OrderService;
pub use product_service::ProductService;
