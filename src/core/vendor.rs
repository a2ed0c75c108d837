//! Vendor business logic - registration and owner-scoped lookups.

use crate::{
    entities::{InvoiceCapability, Market, Vendor, vendor},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;

/// A vendor joined with its market's name for display.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    /// The vendor itself
    pub vendor: vendor::Model,
    /// Name of the market the stall belongs to, if any
    pub market_name: Option<String>,
}

/// Lists the owner's vendors alphabetically, with market names joined.
pub async fn list_vendors(db: &DatabaseConnection, owner_id: &str) -> Result<Vec<VendorRow>> {
    let markets: HashMap<i64, String> = Market::find()
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let vendors = Vendor::find()
        .filter(vendor::Column::OwnerId.eq(owner_id))
        .order_by_asc(vendor::Column::Name)
        .all(db)
        .await?;

    Ok(vendors
        .into_iter()
        .map(|v| VendorRow {
            market_name: v.market_id.and_then(|id| markets.get(&id).cloned()),
            vendor: v,
        })
        .collect())
}

/// Fetches one vendor, scoped to the owner. Absent and not-owned are both
/// reported as not found.
pub async fn get_vendor(
    db: &DatabaseConnection,
    vendor_id: i64,
    owner_id: &str,
) -> Result<vendor::Model> {
    Vendor::find_by_id(vendor_id)
        .filter(vendor::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or(Error::VendorNotFound { id: vendor_id })
}

/// Registers a vendor for the owner, validating the name.
pub async fn create_vendor(
    db: &DatabaseConnection,
    owner_id: String,
    name: String,
    stall_number: Option<String>,
    market_id: Option<i64>,
    invoice_capability: InvoiceCapability,
) -> Result<vendor::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "vendor name cannot be empty".to_string(),
        });
    }

    let vendor = vendor::ActiveModel {
        owner_id: Set(owner_id),
        name: Set(name.trim().to_string()),
        stall_number: Set(stall_number),
        market_id: Set(market_id),
        invoice_capability: Set(invoice_capability),
        ..Default::default()
    };

    vendor.insert(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_market, create_test_vendor, setup_test_db};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_vendor_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_vendor(
            &db,
            "owner-1".to_string(),
            "   ".to_string(),
            None,
            None,
            InvoiceCapability::Supported,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_list_vendors_scoped_and_sorted() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_vendor(&db, "owner-1", "Zesty Citrus").await?;
        create_test_vendor(&db, "owner-1", "Apple Cart").await?;
        create_test_vendor(&db, "owner-2", "Other Owner Stall").await?;

        let rows = list_vendors(&db, "owner-1").await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].vendor.name, "Apple Cart");
        assert_eq!(rows[1].vendor.name, "Zesty Citrus");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_vendor_scoping() -> Result<()> {
        let db = setup_test_db().await?;
        let vendor = create_test_vendor(&db, "owner-1", "Kim's Produce").await?;

        assert_eq!(get_vendor(&db, vendor.id, "owner-1").await?.id, vendor.id);
        let result = get_vendor(&db, vendor.id, "owner-2").await;
        assert!(matches!(result.unwrap_err(), Error::VendorNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_market_name_joined() -> Result<()> {
        let db = setup_test_db().await?;
        let market = create_test_market(&db, "Night Market").await?;
        create_vendor(
            &db,
            "owner-1".to_string(),
            "Kim's Produce".to_string(),
            None,
            Some(market.id),
            InvoiceCapability::NotSupported,
        )
        .await?;

        let rows = list_vendors(&db, "owner-1").await?;
        assert_eq!(rows[0].market_name.as_deref(), Some("Night Market"));
        Ok(())
    }
}
