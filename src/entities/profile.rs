//! Profile entity - Business details used by the export composer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Business profile database model, keyed by user id
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Owning user id
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Registered business name
    pub business_name: Option<String>,
    /// Business registration number, stored as entered
    pub registration_number: Option<String>,
    /// Representative's name
    pub representative: Option<String>,
    /// Contact email preferred over the account email in exports
    pub email: Option<String>,
}

/// Profiles have no modeled relations; they are joined by `user_id` ad hoc
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
