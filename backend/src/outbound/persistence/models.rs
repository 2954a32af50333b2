//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::calculations;

/// Row struct for reading from the calculations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub calculation_type: String,
    pub inputs: serde_json::Value,
    pub result: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating calculation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculations)]
pub(crate) struct NewCalculationRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub calculation_type: &'a str,
    pub inputs: &'a serde_json::Value,
    pub result: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for upserting calculation records.
///
/// `result` is written even when `None` so a cleared cache persists as
/// `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = calculations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CalculationUpdate<'a> {
    pub inputs: &'a serde_json::Value,
    pub result: Option<f64>,
    pub updated_at: DateTime<Utc>,
}
