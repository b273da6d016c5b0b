//! # Seed Data Generator
//!
//! Populates the database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (LOJA_DATABASE_PATH or ./loja.db)
//! cargo run -p loja-db --bin seed
//!
//! # Specify database path
//! cargo run -p loja-db --bin seed -- --db ./data/loja.db
//! ```

use std::env;

use loja_core::NewProduct;
use loja_db::service::ProductDirectory;
use loja_db::{Database, DbConfig};

/// (reference, name, category, cost cents, sale price cents, stock)
const CATALOG: &[(&str, &str, &str, i64, Option<i64>, i64)] = &[
    ("MUG-01", "Ceramic mug white", "kitchen", 800, Some(2500), 40),
    ("MUG-02", "Ceramic mug black", "kitchen", 800, Some(2500), 35),
    ("MUG-03", "Travel mug steel", "kitchen", 1500, Some(4500), 12),
    ("TEE-01", "T-shirt logo M", "clothing", 1200, Some(3900), 25),
    ("TEE-02", "T-shirt logo G", "clothing", 1200, Some(3900), 18),
    ("CAP-01", "Snapback cap", "clothing", 900, Some(2900), 20),
    ("STK-01", "Sticker pack", "stationery", 150, Some(990), 200),
    ("NBK-01", "Notebook A5 dotted", "stationery", 600, Some(1890), 60),
    ("NBK-02", "Notebook A5 lined", "stationery", 600, Some(1890), 55),
    ("PST-01", "Poster 30x40", "decor", 400, Some(1500), 30),
    ("FRM-01", "Picture frame", "decor", 1100, Some(3200), 8),
    // Not priced yet: cannot be sold until it gets a sale price.
    ("KEY-01", "Keychain prototype", "accessories", 300, None, 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config = DbConfig::new(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Loja Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $LOJA_DATABASE_PATH or ./loja.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Loja Seed Data Generator");
    println!("========================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;

    println!("Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {existing} products");
        println!("Skipping seed to avoid duplicates.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let directory = ProductDirectory::new(db.clone());
    let mut created = 0;

    for (reference, name, category, cost, price, stock) in CATALOG {
        let product = NewProduct {
            reference: (*reference).to_string(),
            name: (*name).to_string(),
            category: (*category).to_string(),
            cost_price_cents: *cost,
            sale_price_cents: *price,
            stock: *stock,
            notes: None,
        };

        if let Err(e) = directory.create(&product).await {
            eprintln!("Failed to insert {reference}: {e}");
            continue;
        }
        created += 1;
    }

    println!("Created {created} products");
    println!("Seed complete!");

    Ok(())
}
