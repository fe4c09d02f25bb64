//! # Seed Data Loader
//!
//! Populates the database with LightBnB fixture data for development.
//!
//! ## Usage
//! ```bash
//! # Load the bundled fixtures into ./lightbnb.db (or $LIGHTBNB_DATABASE_PATH)
//! cargo run -p lightbnb-db --bin seed
//!
//! # Specify database path and fixture file
//! cargo run -p lightbnb-db --bin seed -- --db ./data/lightbnb.db --fixtures ./fixtures/seed.json
//!
//! # More output
//! RUST_LOG=lightbnb_db=debug cargo run -p lightbnb-db --bin seed
//! ```
//!
//! ## Fixture Format
//! ```text
//! {
//!   "users":        [ { name, email, password } ],
//!   "properties":   [ { owner_id, title, cost_per_night, city, ... } ],
//!   "reservations": [ { guest_id, property_id, start_date, end_date } ],
//!   "reviews":      [ { guest_id, property_id, reservation_id, rating, message } ]
//! }
//! ```
//!
//! Ids inside the file are 1-based positions in the preceding lists
//! (`owner_id: 2` is the second user), so the file loads correctly whatever
//! ids the database hands out.

use serde::Deserialize;
use std::env;
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lightbnb_core::{
    FilterCriteria, NewProperty, NewPropertyReview, NewReservation, NewUser, ResultLimit,
};
use lightbnb_db::{Database, DbConfig};

const DEFAULT_FIXTURES: &str = "./fixtures/seed.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixtures {
    users: Vec<NewUser>,
    properties: Vec<NewProperty>,
    reservations: Vec<NewReservation>,
    reviews: Vec<NewPropertyReview>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<String> = None;
    let mut fixtures_path = String::from(DEFAULT_FIXTURES);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--fixtures" | "-f" => {
                if i + 1 < args.len() {
                    fixtures_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("LightBnB Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>         Database file path (default: $LIGHTBNB_DATABASE_PATH or ./lightbnb.db)");
                println!("  -f, --fixtures <PATH>   Fixture file (default: {DEFAULT_FIXTURES})");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = DbConfig::from_env()?;
    if let Some(path) = db_path {
        config.database_path = PathBuf::from(path);
    }

    let raw = std::fs::read_to_string(&fixtures_path)?;
    let fixtures: Fixtures = serde_json::from_str(&raw)?;
    info!(
        path = %fixtures_path,
        users = fixtures.users.len(),
        properties = fixtures.properties.len(),
        reservations = fixtures.reservations.len(),
        reviews = fixtures.reviews.len(),
        "Loaded fixtures"
    );

    let db = Database::new(config).await?;

    let existing = db.users().count().await?;
    if existing > 0 {
        warn!(
            users = existing,
            "Database already has users, skipping seed. Delete the database file to reload."
        );
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut user_ids = Vec::with_capacity(fixtures.users.len());
    for user in &fixtures.users {
        user_ids.push(db.users().insert(user).await?.id);
    }

    let mut property_ids = Vec::with_capacity(fixtures.properties.len());
    for property in &fixtures.properties {
        let property = NewProperty {
            owner_id: resolve(&user_ids, property.owner_id, "owner_id")?,
            ..property.clone()
        };
        property_ids.push(db.properties().insert(&property).await?.id);
    }

    let mut reservation_ids = Vec::with_capacity(fixtures.reservations.len());
    for reservation in &fixtures.reservations {
        let reservation = NewReservation {
            guest_id: resolve(&user_ids, reservation.guest_id, "guest_id")?,
            property_id: resolve(&property_ids, reservation.property_id, "property_id")?,
            ..reservation.clone()
        };
        reservation_ids.push(db.reservations().insert(&reservation).await?.id);
    }

    for review in &fixtures.reviews {
        let review = NewPropertyReview {
            guest_id: resolve(&user_ids, review.guest_id, "guest_id")?,
            property_id: resolve(&property_ids, review.property_id, "property_id")?,
            reservation_id: resolve(&reservation_ids, review.reservation_id, "reservation_id")?,
            ..review.clone()
        };
        db.properties().add_review(&review).await?;
    }

    info!(elapsed = ?start.elapsed(), "Fixtures inserted");

    // Verify search
    let all = db
        .properties()
        .search(&FilterCriteria::default(), ResultLimit::default())
        .await?;
    info!(results = all.len(), "Search with no filters");

    let rated = FilterCriteria {
        min_rating: Some(4.0),
        ..FilterCriteria::default()
    };
    let rated = db.properties().search(&rated, ResultLimit::default()).await?;
    info!(results = rated.len(), "Search minimum_rating >= 4");

    db.close().await;
    info!("Seed complete");

    Ok(())
}

/// Maps a 1-based fixture position to the id the database assigned.
fn resolve(ids: &[i64], position: i64, field: &str) -> Result<i64, Box<dyn Error>> {
    usize::try_from(position)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|index| ids.get(index).copied())
        .ok_or_else(|| format!("{field} {position} does not refer to an earlier fixture").into())
}
