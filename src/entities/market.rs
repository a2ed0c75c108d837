//! Market entity - A physical market that stalls belong to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Market database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "markets")]
pub struct Model {
    /// Unique identifier for the market
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Market name
    pub name: String,
}

/// Defines relationships between Market and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One market has many vendors
    #[sea_orm(has_many = "super::vendor::Entity")]
    Vendors,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
