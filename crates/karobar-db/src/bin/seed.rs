//! # Seed Data Generator
//!
//! Populates the database with sample catalog items for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p karobar-db --bin seed
//!
//! # Specify database path
//! cargo run -p karobar-db --bin seed -- --db ./data/karobar.db
//! ```

use std::env;

use karobar_db::repository::inventory::NewInventoryItem;
use karobar_db::{Database, DbConfig};
use tracing::info;

/// Sample items: (code, name, division, brand, unit, mrp paise, stock)
const SAMPLE_ITEMS: &[(&str, &str, &str, &str, &str, i64, i64)] = &[
    ("ATTA-5", "Surya Atta 5kg", "Staples", "Surya", "bag", 28_500, 40),
    ("RICE-1", "Basmati Rice 1kg", "Staples", "Daawat", "kg", 14_900, 60),
    ("OIL-1L", "Sunflower Oil 1L", "Staples", "Fortune", "btl", 13_500, 80),
    ("TEA-250", "Assam Tea 250g", "Beverages", "Tata", "box", 12_000, 35),
    ("SUGAR-1", "Sugar 1kg", "Staples", "Madhur", "kg", 4_500, 100),
    ("SOAP-4", "Bath Soap 4-pack", "Personal Care", "Santoor", "pack", 9_600, 50),
    ("DETER-1", "Detergent Powder 1kg", "Home Care", "Surf", "kg", 11_000, 45),
    ("BISC-P", "Glucose Biscuits", "Snacks", "Parle", "pkt", 1_000, 200),
    ("SALT-1", "Iodised Salt 1kg", "Staples", "Tata", "kg", 2_800, 120),
    ("GHEE-05", "Pure Ghee 500ml", "Dairy", "Amul", "jar", 32_500, 25),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = parse_db_path().unwrap_or_else(|| "./karobar.db".to_string());
    info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let inventory = db.inventory();

    let mut inserted = 0usize;
    for (code, name, division, brand, unit, mrp, stock) in SAMPLE_ITEMS {
        let item = NewInventoryItem {
            item_code: code.to_string(),
            item_name: name.to_string(),
            division: division.to_string(),
            brand: brand.to_string(),
            base_unit: unit.to_string(),
            mrp_paise: *mrp,
            available_stock: *stock,
        };
        match inventory.insert(&item).await {
            Ok(_) => inserted += 1,
            // Re-running the seed against an existing database is fine.
            Err(karobar_db::DbError::UniqueViolation { .. }) => {
                info!(code = %code, "Already seeded, skipping")
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(inserted, "Seed complete");
    Ok(())
}

/// Parses `--db <path>` from the command line.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1).cloned())
}
