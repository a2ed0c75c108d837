//! Application configuration and seed data from stallbook.toml.
//!
//! The config file carries the object-store root plus the markets and
//! vendors to make sure exist on startup. Seeding is idempotent: entries
//! that already exist by name are skipped.

use crate::core::vendor::create_vendor;
use crate::entities::{InvoiceCapability, Market, Vendor, market, vendor};
use crate::errors::{Error, Result};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire stallbook.toml file
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// User id the seeded vendors belong to
    pub owner_id: String,
    /// Root directory for the local object store
    #[serde(default = "default_storage_root")]
    pub storage_root: String,
    /// Markets to make sure exist
    #[serde(default)]
    pub markets: Vec<MarketSeed>,
    /// Vendors to make sure exist
    #[serde(default)]
    pub vendors: Vec<VendorSeed>,
}

fn default_storage_root() -> String {
    "data/objects".to_string()
}

/// Seed entry for a market
#[derive(Debug, Deserialize, Clone)]
pub struct MarketSeed {
    /// Market name
    pub name: String,
}

/// Seed entry for a vendor
#[derive(Debug, Deserialize, Clone)]
pub struct VendorSeed {
    /// Vendor name
    pub name: String,
    /// Stall number within the market
    #[serde(default)]
    pub stall_number: Option<String>,
    /// Name of the market the stall belongs to; must appear in `markets`
    #[serde(default)]
    pub market: Option<String>,
    /// Whether the vendor can issue tax invoices
    pub invoice_capability: InvoiceCapability,
}

/// Loads the application configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse stallbook.toml: {e}"),
    })
}

/// Loads the configuration from the default location (./stallbook.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config("stallbook.toml")
}

/// Makes sure every configured market and vendor exists, by name.
pub async fn seed_from_config(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    for seed in &config.markets {
        find_or_create_market(db, &seed.name).await?;
    }

    for seed in &config.vendors {
        let existing = Vendor::find()
            .filter(vendor::Column::OwnerId.eq(&config.owner_id))
            .filter(vendor::Column::Name.eq(&seed.name))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let market_id = match &seed.market {
            Some(name) => Some(find_or_create_market(db, name).await?.id),
            None => None,
        };
        create_vendor(
            db,
            config.owner_id.clone(),
            seed.name.clone(),
            seed.stall_number.clone(),
            market_id,
            seed.invoice_capability,
        )
        .await?;
        info!(vendor = %seed.name, "seeded vendor");
    }

    Ok(())
}

async fn find_or_create_market(db: &DatabaseConnection, name: &str) -> Result<market::Model> {
    if let Some(existing) = Market::find()
        .filter(market::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }
    market::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
