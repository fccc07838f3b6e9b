//! Split entity - A saved snapshot of a settled bill.
//!
//! Each row keeps the full bill as JSON so it can be reloaded and recomputed,
//! plus the grand total and payer name for listing history without decoding.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Saved split database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "splits")]
pub struct Model {
    /// Unique identifier for the saved split
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User-facing title (e.g., "Friday dinner")
    pub title: String,
    /// The bill serialized as JSON
    pub bill_json: String,
    /// Grand total at the time of saving
    pub grand_total: f64,
    /// Payer display name at the time of saving
    pub payer_name: String,
    /// Number of people on the bill
    pub people_count: i32,
    /// When the split was saved
    pub created_at: DateTimeUtc,
}

/// `Split` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
