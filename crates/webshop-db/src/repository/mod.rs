//! # Repository Module
//!
//! Database repository implementations for the webshop.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service (webshop-api)                                                  │
//! │       │                                                                 │
//! │       │  db.orders().submit(&id, totals, now)                           │
//! │       ▼                                                                 │
//! │  OrderRepository                                                        │
//! │  ├── get_by_id / items                                                  │
//! │  ├── create_with_items / replace_items                                  │
//! │  ├── submit (conditional on draft)                                      │
//! │  └── delete (items, then order)                                         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD
//! - [`product::ProductRepository`] - Product CRUD and batch lookup
//! - [`order::OrderRepository`] - Orders and their line items

pub mod customer;
pub mod order;
pub mod product;
