//! # Seed Data Generator
//!
//! Populates the product record with demo inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Products go through `ProductStore::add`, so every seeded record passes
//! the same validation as user input. Recent timestamps are spread over
//! the last few months so every report date range has something to show.

use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use stockroom_core::store::ProductStore;
use stockroom_core::types::NewProduct;
use stockroom_core::CoreResult;
use stockroom_db::{Database, DbConfig};

/// (category, [(name, price, stock, min stock)])
type Catalog<'a> = &'a [(&'a str, &'a [(&'a str, &'a str, i64, i64)])];

const CATALOG: Catalog<'static> = &[
    (
        "Electronics",
        &[
            ("USB-C Cable", "249.00", 42, 10),
            ("Wireless Mouse", "799.00", 6, 8),
            ("Keyboard", "1499.00", 15, 5),
            ("HDMI Adapter", "399.50", 3, 5),
        ],
    ),
    (
        "Stationery",
        &[
            ("A4 Notebook", "60.00", 120, 30),
            ("Gel Pen", "15.00", 25, 50),
            ("Stapler", "180.00", 9, 4),
            ("Sticky Notes", "45.00", 12, 12),
        ],
    ),
    (
        "Groceries",
        &[
            ("Basmati Rice 5kg", "625.00", 18, 10),
            ("Green Tea", "210.00", 2, 6),
            ("Olive Oil 1L", "899.00", 11, 4),
        ],
    ),
    (
        "Cleaning",
        &[
            ("Dish Soap", "95.00", 30, 10),
            ("Floor Cleaner", "240.00", 4, 6),
            ("Microfiber Cloth", "75.00", 60, 15),
        ],
    ),
];

/// Days ago each successive product was last touched.
const AGE_DAYS: &[i64] = &[0, 2, 5, 9, 14, 21, 33, 45, 60, 80, 100, 150, 200, 300];

/// Builds the demo store. Any entry that fails validation aborts the seed.
fn seed_store(catalog: Catalog<'_>, now: DateTime<Utc>) -> CoreResult<ProductStore> {
    let mut store = ProductStore::new();
    let items = catalog
        .iter()
        .flat_map(|(category, items)| items.iter().map(move |item| (*category, item)));

    for (i, (category, (name, price, stock, min_stock))) in items.enumerate() {
        let age = AGE_DAYS[i % AGE_DAYS.len()];
        let input = NewProduct::new(*name, category, *price, *stock, *min_stock);
        store.add_at(input, now - Duration::days(age))?;
    }

    Ok(store)
}

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Stockroom seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./stockroom_dev.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let store = seed_store(CATALOG, Utc::now())?;

    db.products().save(&store.snapshot()).await?;

    let low = store.products().iter().filter(|p| p.is_low_stock()).count();
    println!();
    println!("✓ Seeded {} products ({} low on stock)", store.len(), low);

    db.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_seeds_every_entry() {
        let expected: usize = CATALOG.iter().map(|(_, items)| items.len()).sum();
        let store = seed_store(CATALOG, Utc::now()).unwrap();
        assert_eq!(store.len(), expected);
    }

    #[test]
    fn test_bad_catalog_entry_fails_the_seed() {
        let catalog: Catalog<'_> = &[("Tools", &[("Hammer", "12.00", 4, 2), ("Saw", "cheap", 3, 1)])];
        assert!(seed_store(catalog, Utc::now()).is_err());
    }
}
