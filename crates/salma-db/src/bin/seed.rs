//! # Seed Data Generator
//!
//! Populates the database with a demo pharmacy catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./salma.db
//! cargo run -p salma-db --bin seed
//!
//! # Specify database path
//! cargo run -p salma-db --bin seed -- --db ./data/salma.db
//! ```
//!
//! ## Generated Data
//! - Medicines with HNA price, margin and tax (some without a KFA code,
//!   so their invoice lines use the GENERIC item code)
//! - Patients with medical record numbers
//! - Doctors (one inactive, hidden from the doctor list)

use std::env;

use salma_core::pricing::selling_price;
use salma_core::{Doctor, Medicine, Patient};
use salma_db::{Database, DbConfig};
use uuid::Uuid;

/// (name, stock, hna_price, margin %, tax %, kfa_code)
const MEDICINES: &[(&str, i64, f64, f64, f64, Option<&str>)] = &[
    ("Paracetamol 500mg Tablet", 250, 1000.0, 10.0, 11.0, Some("93000101")),
    ("Amoxicillin 500mg Kapsul", 120, 1850.0, 15.0, 11.0, Some("93000245")),
    ("Vitamin C 100mg Tablet", 400, 333.0, 5.0, 7.0, None),
    ("Omeprazole 20mg Kapsul", 80, 2475.5, 12.5, 11.0, Some("93000388")),
    ("Cetirizine 10mg Tablet", 150, 790.0, 20.0, 11.0, Some("93000412")),
    ("Metformin 500mg Tablet", 300, 420.0, 10.0, 11.0, Some("93000533")),
    ("Salbutamol 2mg Tablet", 90, 310.0, 25.0, 0.0, None),
    ("Oralit Sachet", 500, 1200.0, 8.0, 11.0, None),
    ("Antasida Doen Suspensi 60ml", 60, 5500.0, 15.0, 11.0, Some("93000690")),
    ("Ibuprofen 400mg Tablet", 200, 650.0, 10.0, 11.0, Some("93000717")),
];

/// (full_name, mr_no)
const PATIENTS: &[(&str, &str)] = &[
    ("Siti Rahmawati", "MR-000101"),
    ("Budi Hartono", "MR-000102"),
    ("Dewi Lestari", "MR-000103"),
    ("Agus Salim", "MR-000104"),
    ("Rina Kusuma", "MR-000105"),
];

/// (name, specialization, is_active)
const DOCTORS: &[(&str, Option<&str>, bool)] = &[
    ("dr. Andi Wijaya", Some("Umum"), true),
    ("dr. Maya Putri, Sp.A", Some("Anak"), true),
    ("dr. Hendra Gunawan, Sp.PD", Some("Penyakit Dalam"), true),
    ("dr. Lina Marlina", None, false),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("SALMA_DB_PATH").unwrap_or_else(|_| String::from("./salma.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SALMA Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./salma.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SALMA Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.medicines().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} medicines", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding medicines...");
    for (name, stock, hna, margin, tax, kfa_code) in MEDICINES {
        let medicine = Medicine {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            stock: *stock,
            hna_price: Some(*hna),
            margin_percentage: Some(*margin),
            tax_rate: Some(*tax),
            kfa_code: kfa_code.map(str::to_string),
        };
        if let Err(e) = db.medicines().insert(&medicine).await {
            eprintln!("Failed to insert {}: {}", medicine.name, e);
            continue;
        }
        println!("  {:<32} {}", medicine.name, selling_price(&medicine));
    }

    println!("Seeding patients...");
    for (full_name, mr_no) in PATIENTS {
        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.to_string(),
            mr_no: Some(mr_no.to_string()),
        };
        if let Err(e) = db.patients().insert(&patient).await {
            eprintln!("Failed to insert {}: {}", patient.full_name, e);
        }
    }

    println!("Seeding doctors...");
    for (name, specialization, is_active) in DOCTORS {
        let doctor = Doctor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            specialization: specialization.map(str::to_string),
        };
        if let Err(e) = db.doctors().insert(&doctor).await {
            eprintln!("Failed to insert {}: {}", doctor.name, e);
            continue;
        }
        if !is_active {
            sqlx::query("UPDATE doctors SET is_active = 0 WHERE id = ?1")
                .bind(&doctor.id)
                .execute(db.pool())
                .await?;
        }
    }

    println!();
    println!(
        "✓ Seeded {} medicines, {} patients, {} active doctors",
        db.medicines().count().await?,
        db.patients().list_all().await?.len(),
        db.doctors().list_active().await?.len()
    );

    db.close().await;
    Ok(())
}
