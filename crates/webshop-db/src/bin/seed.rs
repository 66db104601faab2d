//! # Seed Data Generator
//!
//! Populates an empty database with demo customers and products.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products and 20 customers (default)
//! cargo run -p webshop-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p webshop-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p webshop-db --bin seed -- --db ./data/webshop.db
//! ```
//!
//! ## Generated Data
//! - Products: code `{CAT}-{NNNNNN}` (exactly 10 characters), price
//!   between 1.99 and 249.99, roughly one in eight marked unavailable
//! - Customers: one per ten products, at least one

use chrono::Utc;
use std::env;
use uuid::Uuid;
use webshop_core::{Customer, Product};
use webshop_db::{Database, DbConfig};

/// Product categories for demo data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "KBD",
        &[
            "Mechanical Keyboard",
            "Wireless Keyboard",
            "Compact Keyboard",
            "Ergonomic Keyboard",
        ],
    ),
    (
        "MOU",
        &["Optical Mouse", "Wireless Mouse", "Gaming Mouse", "Trackball"],
    ),
    (
        "CBL",
        &[
            "USB-C Cable",
            "HDMI Cable",
            "DisplayPort Cable",
            "Ethernet Cable",
            "Lightning Cable",
        ],
    ),
    (
        "MON",
        &["24\" Monitor", "27\" Monitor", "Portable Monitor", "Ultrawide Monitor"],
    ),
    (
        "AUD",
        &["Headphones", "Earbuds", "USB Microphone", "Desk Speakers"],
    ),
];

const FIRST_NAMES: &[&str] = &["Ana", "Ivan", "Marija", "Luka", "Petra", "Marko", "Iva", "Josip"];
const LAST_NAMES: &[&str] = &["Horvat", "Kovačević", "Babić", "Marić", "Jurić", "Novak"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./webshop_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    // Six digits of sequence keep codes at 10 characters
                    count = args[i + 1].parse::<usize>().unwrap_or(200).min(999_999);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Webshop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./webshop_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Webshop Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await? + db.customers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has data");
        println!("  Skipping seed to avoid duplicate product codes.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut products = 0;
    for seed in 0..count {
        let product = generate_product(seed);
        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.code, e);
            continue;
        }
        products += 1;
    }

    let mut customers = 0;
    for seed in 0..(count / 10).max(1) {
        let customer = generate_customer(seed);
        if let Err(e) = db.customers().insert(&customer).await {
            eprintln!("Failed to insert customer {}: {}", customer.email, e);
            continue;
        }
        customers += 1;
    }

    println!();
    println!(
        "✓ Generated {} products and {} customers in {:?}",
        products,
        customers,
        start.elapsed()
    );

    Ok(())
}

/// Generates a single product with deterministic demo data.
fn generate_product(seed: usize) -> Product {
    let now = Utc::now();
    let (category, names) = CATEGORIES[seed % CATEGORIES.len()];
    let name = names[(seed / CATEGORIES.len()) % names.len()];

    // 3 + 1 + 6 = 10 characters
    let code = format!("{}-{:06}", category, seed);

    // 1.99 - 249.99
    let price_cents = 199 + ((seed * 7919) % 24800) as i64;

    Product {
        id: Uuid::new_v4().to_string(),
        code,
        name: format!("{} #{}", name, seed),
        price_cents,
        description: Some(format!("Demo {} product", category.to_lowercase())),
        is_available: seed % 8 != 7,
        created_at: now,
        updated_at: now,
    }
}

/// Generates a single customer with a unique email.
fn generate_customer(seed: usize) -> Customer {
    let now = Utc::now();
    let first = FIRST_NAMES[seed % FIRST_NAMES.len()];
    let last = LAST_NAMES[seed % LAST_NAMES.len()];

    Customer {
        id: Uuid::new_v4().to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.hr", first.to_lowercase(), seed),
        created_at: now,
        updated_at: now,
    }
}
