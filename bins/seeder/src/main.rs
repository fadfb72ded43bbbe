//! Database seeder for Amaramba development and testing.
//!
//! Seeds sample products and customer submissions, then prints a
//! short-lived admin token for calling the staff routes locally.
//!
//! Usage: cargo run --bin seeder

use amaramba_db::{
    CreateCustomerInput, CreateProductInput, CustomerRepository, ProductRepository, connect,
};
use amaramba_shared::{AppConfig, JwtConfig, JwtService, Role};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Dev admin user ID (consistent across runs)
const DEV_ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";

/// (name, batch number, description, PDF URL)
const PRODUCTS: [(&str, &str, &str, Option<&str>); 3] = [
    (
        "Cold-Pressed Mustard Oil",
        "MO-2026-001",
        "1L bottle, first pressing",
        Some("https://blr1.digitaloceanspaces.com/amaramba/QRSCAN/PDFs/mustard-oil_report.pdf"),
    ),
    (
        "Organic Turmeric Powder",
        "TP-2026-014",
        "200g pouch",
        Some("https://blr1.digitaloceanspaces.com/amaramba/QRSCAN/PDFs/turmeric_report.pdf"),
    ),
    ("Wild Forest Honey", "WH-2026-007", "500g jar", None),
];

/// (email, batch number, device, os, browser)
const CUSTOMERS: [(&str, &str, &str, &str, &str); 2] = [
    ("asha@example.com", "MO-2026-001", "Mobile", "Android 14", "Chrome 120"),
    ("ravi@example.com", "TP-2026-014", "Desktop", "Windows 10/11", "Firefox 121"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;

    println!("Seeding products...");
    seed_products(&db).await;

    println!("Seeding customers...");
    seed_customers(&db).await;

    let jwt = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: 60,
    });
    let token = jwt.generate_access_token(Uuid::parse_str(DEV_ADMIN_ID)?, Role::Admin)?;
    println!("Dev admin token (60 minutes):\n  {token}");

    println!("Seeding complete!");
    Ok(())
}

async fn seed_products(db: &DatabaseConnection) {
    let repo = ProductRepository::new(db);
    let mut inserted = 0;

    for (name, batch_no, description, pdf_url) in PRODUCTS {
        match repo.find_by_batch_no(batch_no).await {
            Ok(Some(_)) => {
                println!("  Product {batch_no} already exists, skipping...");
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("Failed to look up product {batch_no}: {e}");
                continue;
            }
        }

        let input = CreateProductInput {
            name: name.to_string(),
            description: Some(description.to_string()),
            batch_no: batch_no.to_string(),
            pdf_url: pdf_url.map(str::to_string),
        };
        if let Err(e) = repo.create(input).await {
            eprintln!("Failed to insert product {batch_no}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} products");
}

async fn seed_customers(db: &DatabaseConnection) {
    let repo = CustomerRepository::new(db);
    let mut inserted = 0;

    for (email, batch_no, device, os, browser) in CUSTOMERS {
        let input = CreateCustomerInput {
            email: email.to_string(),
            batch_no: batch_no.to_string(),
            ip_address: "127.0.0.1".to_string(),
            device: Some(device.to_string()),
            os: Some(os.to_string()),
            location: Some("Local Network".to_string()),
            browser: Some(browser.to_string()),
        };
        match repo.create(input).await {
            Ok(_) => inserted += 1,
            Err(amaramba_db::RepositoryError::DuplicateEmail(_)) => {
                println!("  Customer {email} already exists, skipping...");
            }
            Err(e) => eprintln!("Failed to insert customer {email}: {e}"),
        }
    }

    println!("  Inserted {inserted} customers");
}
