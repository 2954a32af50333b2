//! Port for calculation persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Calculation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calculation repository adapters.
    pub enum CalculationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation repository query failed: {message}",
        /// The owning user does not exist.
        UnknownOwner { owner_id: UserId } =>
            "calculation owner {owner_id} does not exist",
    }
}

/// Port for storing and loading calculations.
///
/// Records are keyed by id. Deleting the owning user removes their
/// calculations; that cascade is the adapter's responsibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Insert a calculation or overwrite the stored row with the same id.
    async fn save(&self, calculation: &Calculation) -> Result<(), CalculationRepositoryError>;

    /// Find a calculation by id.
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<Calculation>, CalculationRepositoryError>;

    /// List an owner's calculations, newest first.
    async fn list_for_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Calculation>, CalculationRepositoryError>;

    /// Delete a calculation, reporting whether a row was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, CalculationRepositoryError>;
}

/// Fixture implementation for code paths that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCalculationRepository;

#[async_trait]
impl CalculationRepository for FixtureCalculationRepository {
    async fn save(&self, _calculation: &Calculation) -> Result<(), CalculationRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &Uuid,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        Ok(None)
    }

    async fn list_for_owner(
        &self,
        _owner_id: &UserId,
    ) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: &Uuid) -> Result<bool, CalculationRepositoryError> {
        Ok(false)
    }
}
