//! Database configuration module for `Stallbook`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always
//! matches the Rust struct definitions without hand-written SQL.

use crate::entities::{Market, Profile, Receipt, ReceiptImage, Vendor};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default local database when `DATABASE_URL` is not set.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/stallbook.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default
/// local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection using the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Existing tables are
/// left alone, so this is safe to run on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut market_table = schema.create_table_from_entity(Market);
    let mut vendor_table = schema.create_table_from_entity(Vendor);
    let mut receipt_table = schema.create_table_from_entity(Receipt);
    let mut image_table = schema.create_table_from_entity(ReceiptImage);
    let mut profile_table = schema.create_table_from_entity(Profile);

    db.execute(builder.build(market_table.if_not_exists())).await?;
    db.execute(builder.build(vendor_table.if_not_exists())).await?;
    db.execute(builder.build(receipt_table.if_not_exists())).await?;
    db.execute(builder.build(image_table.if_not_exists())).await?;
    db.execute(builder.build(profile_table.if_not_exists())).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        market::Model as MarketModel, profile::Model as ProfileModel,
        receipt::Model as ReceiptModel, receipt_image::Model as ReceiptImageModel,
        vendor::Model as VendorModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Every table exists and is queryable
        let _: Vec<MarketModel> = Market::find().limit(1).all(&db).await?;
        let _: Vec<VendorModel> = Vendor::find().limit(1).all(&db).await?;
        let _: Vec<ReceiptModel> = Receipt::find().limit(1).all(&db).await?;
        let _: Vec<ReceiptImageModel> = ReceiptImage::find().limit(1).all(&db).await?;
        let _: Vec<ProfileModel> = Profile::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<ReceiptModel> = Receipt::find().limit(1).all(&db).await?;
        Ok(())
    }
}
