//! Business profile logic - the details the export composer prints.

use crate::{
    entities::{Profile, profile},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Fetches a user's business profile, if one was saved.
pub async fn get_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<profile::Model>> {
    Profile::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates or replaces the user's business profile.
pub async fn upsert_profile(
    db: &DatabaseConnection,
    user_id: &str,
    business_name: Option<String>,
    registration_number: Option<String>,
    representative: Option<String>,
    email: Option<String>,
) -> Result<profile::Model> {
    let existing = get_profile(db, user_id).await?;

    let active = profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        business_name: Set(business_name),
        registration_number: Set(registration_number),
        representative: Set(representative),
        email: Set(email),
    };

    if existing.is_some() {
        active.update(db).await.map_err(Into::into)
    } else {
        active.insert(db).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_profile_round_trip() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_profile(&db, "owner-1").await?.is_none());

        let saved = upsert_profile(
            &db,
            "owner-1",
            Some("Kim Trading Co.".to_string()),
            Some("123-45-67890".to_string()),
            Some("Kim Minji".to_string()),
            Some("kim@example.com".to_string()),
        )
        .await?;
        assert_eq!(saved.business_name.as_deref(), Some("Kim Trading Co."));

        // Upsert replaces in place
        let updated = upsert_profile(
            &db,
            "owner-1",
            Some("Kim Trading Co.".to_string()),
            None,
            None,
            Some("billing@example.com".to_string()),
        )
        .await?;
        assert_eq!(updated.email.as_deref(), Some("billing@example.com"));
        assert!(updated.registration_number.is_none());

        let reloaded = get_profile(&db, "owner-1").await?.unwrap();
        assert_eq!(reloaded, updated);
        Ok(())
    }
}
