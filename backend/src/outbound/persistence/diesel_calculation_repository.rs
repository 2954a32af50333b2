//! PostgreSQL-backed `CalculationRepository` implementation using Diesel ORM.
//!
//! Rows are rehydrated through [`CalculationDraft`], so a row that no longer
//! satisfies the domain invariants surfaces as a query error rather than an
//! invalid record.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CalculationRepository, CalculationRepositoryError};
use crate::domain::{Calculation, CalculationDraft, CalculationInputs, CalculationType, UserId};

use super::models::{CalculationRow, CalculationUpdate, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the calculation repository port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    CalculationRepositoryError::connection(message)
}

fn map_diesel_error(error: DieselError) -> CalculationRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => CalculationRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            CalculationRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CalculationRepositoryError::connection("database connection error")
        }
        _ => CalculationRepositoryError::query("database error"),
    }
}

/// Map a failed upsert, attributing foreign-key violations to the owner.
fn map_save_error(error: DieselError, owner_id: UserId) -> CalculationRepositoryError {
    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &error {
        debug!(
            owner_id = %owner_id,
            message = info.message(),
            "calculation owner missing"
        );
        return CalculationRepositoryError::unknown_owner(owner_id);
    }
    map_diesel_error(error)
}

/// Convert a database row into a validated domain calculation.
fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationRepositoryError> {
    let CalculationRow {
        id,
        user_id,
        calculation_type,
        inputs,
        result,
        created_at,
        updated_at,
    } = row;

    let decode_error = |err: crate::domain::CalculationError| {
        CalculationRepositoryError::query(format!("decode calculation {id}: {err}"))
    };

    let kind = calculation_type
        .parse::<CalculationType>()
        .map_err(decode_error)?;
    let inputs = CalculationInputs::from_json(&inputs).map_err(decode_error)?;

    Calculation::new(CalculationDraft {
        id,
        owner_id: UserId::from_uuid(user_id),
        kind,
        inputs: inputs.into(),
        result,
        created_at,
        updated_at,
    })
    .map_err(decode_error)
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn save(&self, calculation: &Calculation) -> Result<(), CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inputs = calculation.inputs().to_json();
        let owner_id = *calculation.owner_id();

        let new_row = NewCalculationRow {
            id: calculation.id(),
            user_id: *owner_id.as_uuid(),
            calculation_type: calculation.kind().as_str(),
            inputs: &inputs,
            result: calculation.result(),
            created_at: calculation.created_at(),
            updated_at: calculation.updated_at(),
        };

        let update_row = CalculationUpdate {
            inputs: &inputs,
            result: calculation.result(),
            updated_at: calculation.updated_at(),
        };

        diesel::insert_into(calculations::table)
            .values(&new_row)
            .on_conflict(calculations::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_save_error(err, owner_id))
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = calculations::table
            .filter(calculations::id.eq(id))
            .select(CalculationRow::as_select())
            .first::<CalculationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_calculation).transpose()
    }

    async fn list_for_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CalculationRow> = calculations::table
            .filter(calculations::user_id.eq(owner_id.as_uuid()))
            .order((calculations::created_at.desc(), calculations::id.desc()))
            .select(CalculationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_calculation).collect()
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(calculations::table.filter(calculations::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
