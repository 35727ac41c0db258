//! # Seed Data Generator
//!
//! Populates a database with customers, products, and one employee with a
//! login, so the back-office can be tried end to end.
//!
//! ## Usage
//! ```bash
//! cargo run -p joshub-db --bin seed
//!
//! # Specify database path and the admin login
//! cargo run -p joshub-db --bin seed -- --db ./data/joshub.db \
//!     --email admin@joshub.co --password secreto
//! ```

use std::env;

use joshub_core::{Customer, Product};
use joshub_db::{Database, DbConfig, NewEmployee};
use tracing_subscriber::EnvFilter;

/// (code, name, cost, watertight price, cold-spot price, stock) in pesos.
const PRODUCTS: &[(&str, &str, i64, i64, i64, i64)] = &[
    ("AGUA-600", "Agua 600ml", 800, 1_500, 1_200, 120),
    ("AGUA-5L", "Agua 5L", 3_500, 6_000, 5_200, 30),
    ("HIELO-2KG", "Bolsa de hielo 2kg", 1_200, 3_000, 2_500, 80),
    ("HIELO-5KG", "Bolsa de hielo 5kg", 2_500, 6_000, 5_000, 40),
    ("GAS-350", "Gaseosa 350ml", 1_300, 2_500, 2_000, 200),
    ("GAS-1500", "Gaseosa 1.5L", 3_000, 5_500, 4_800, 60),
    ("CERV-330", "Cerveza 330ml", 1_900, 3_500, 3_000, 240),
    ("JUGO-300", "Jugo de naranja 300ml", 1_600, 3_000, 2_600, 50),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("1032456789", "Ana Gómez"),
    ("79845123", "Carlos Ruiz"),
    ("52987654", "María Fernanda López"),
    ("1018234567", "Tienda Don Pepe"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./joshub_dev.db");
    let mut email = String::from("admin@joshub.co");
    let mut password = String::from("secreto");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" if i + 1 < args.len() => {
                db_path = args[i + 1].clone();
                i += 1;
            }
            "--email" if i + 1 < args.len() => {
                email = args[i + 1].clone();
                i += 1;
            }
            "--password" if i + 1 < args.len() => {
                password = args[i + 1].clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Joshub Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./joshub_dev.db)");
                println!("      --email <EMAIL>    Admin login (default: admin@joshub.co)");
                println!("      --password <PASS>  Admin password (default: secreto)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Joshub Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count_active().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (code, name, cost, watertight, cold_spot, stock) in PRODUCTS {
        let product = Product {
            code: code.to_string(),
            name: name.to_string(),
            quantity: *stock,
            cost_cents: cost * 100,
            watertight_price_cents: watertight * 100,
            cold_spot_price_cents: cold_spot * 100,
            deleted_at: None,
        };

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.code, e);
        }
    }
    println!("✓ {} products", PRODUCTS.len());

    for (id, name) in CUSTOMERS {
        let customer = Customer {
            id: id.to_string(),
            name: name.to_string(),
        };

        if let Err(e) = db.customers().insert(&customer).await {
            eprintln!("Failed to insert customer {}: {}", customer.id, e);
        }
    }
    println!("✓ {} customers", CUSTOMERS.len());

    let user = db.auth().sign_up(&email, &password).await?;
    let employee = db
        .employees()
        .insert(&NewEmployee {
            id: "1000000001".to_string(),
            name: "Administrador".to_string(),
            phone: "3000000000".to_string(),
            salary_cents: 0,
            user_id: user.id,
        })
        .await?;
    println!("✓ Employee {} signs in as {}", employee.name, email);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
