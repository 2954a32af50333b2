//! Calculation domain service.
//!
//! Orchestrates the factory, evaluator and repository on behalf of an owning
//! user. Every operation that names a calculation id first checks that the
//! caller owns it.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{CalculationRepository, CalculationRepositoryError};
use crate::domain::{Calculation, CalculationError, Error, UserId};

/// Input for [`CalculationService::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCalculationRequest {
    pub owner_id: UserId,
    /// Type tag, matched case-insensitively.
    pub calculation_type: String,
    pub inputs: Vec<f64>,
    /// Evaluate and cache the result before saving.
    pub evaluate: bool,
}

fn map_calculation_error(error: CalculationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "reason": error.reason() }))
}

fn map_repository_error(error: CalculationRepositoryError) -> Error {
    match error {
        CalculationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("calculation repository unavailable: {message}"))
        }
        CalculationRepositoryError::Query { message } => {
            Error::internal(format!("calculation repository error: {message}"))
        }
        CalculationRepositoryError::UnknownOwner { owner_id } => {
            Error::not_found(format!("user {owner_id} does not exist"))
        }
    }
}

/// Service managing user-owned calculations.
#[derive(Clone)]
pub struct CalculationService<R> {
    calculation_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CalculationService<R> {
    /// Create a new service backed by `calculation_repo`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use calc_backend::domain::CalculationService;
    /// # use calc_backend::domain::ports::FixtureCalculationRepository;
    /// # use mockable::DefaultClock;
    /// let service = CalculationService::new(
    ///     Arc::new(FixtureCalculationRepository),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(calculation_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            calculation_repo,
            clock,
        }
    }
}

impl<R> CalculationService<R>
where
    R: CalculationRepository,
{
    /// Build a calculation through the factory, optionally evaluate it, and
    /// persist it.
    pub async fn create(&self, request: CreateCalculationRequest) -> Result<Calculation, Error> {
        let CreateCalculationRequest {
            owner_id,
            calculation_type,
            inputs,
            evaluate,
        } = request;

        let mut calculation = Calculation::create_with_clock(
            &calculation_type,
            owner_id,
            inputs,
            self.clock.as_ref(),
        )
        .map_err(map_calculation_error)?;

        if evaluate {
            calculation
                .compute_result(self.clock.utc())
                .map_err(map_calculation_error)?;
        }

        self.calculation_repo
            .save(&calculation)
            .await
            .map_err(map_repository_error)?;

        info!(
            calculation_id = %calculation.id(),
            owner_id = %calculation.owner_id(),
            calculation = %calculation,
            evaluated = calculation.result().is_some(),
            "calculation created"
        );
        Ok(calculation)
    }

    /// Fetch one of the owner's calculations.
    pub async fn get(&self, owner_id: &UserId, id: Uuid) -> Result<Calculation, Error> {
        self.load_owned(owner_id, id).await
    }

    /// List the owner's calculations, newest first.
    pub async fn list(&self, owner_id: &UserId) -> Result<Vec<Calculation>, Error> {
        self.calculation_repo
            .list_for_owner(owner_id)
            .await
            .map_err(map_repository_error)
    }

    /// Evaluate a stored calculation and persist the cached result.
    pub async fn evaluate(&self, owner_id: &UserId, id: Uuid) -> Result<Calculation, Error> {
        let mut calculation = self.load_owned(owner_id, id).await?;
        let value = calculation
            .compute_result(self.clock.utc())
            .map_err(map_calculation_error)?;

        self.calculation_repo
            .save(&calculation)
            .await
            .map_err(map_repository_error)?;

        debug!(calculation_id = %id, result = value, "calculation evaluated");
        Ok(calculation)
    }

    /// Replace a stored calculation's inputs, clearing its cached result.
    pub async fn replace_inputs(
        &self,
        owner_id: &UserId,
        id: Uuid,
        inputs: Vec<f64>,
    ) -> Result<Calculation, Error> {
        let mut calculation = self.load_owned(owner_id, id).await?;
        calculation
            .replace_inputs(inputs, self.clock.utc())
            .map_err(map_calculation_error)?;

        self.calculation_repo
            .save(&calculation)
            .await
            .map_err(map_repository_error)?;

        debug!(
            calculation_id = %id,
            input_count = calculation.inputs().len(),
            "calculation inputs replaced"
        );
        Ok(calculation)
    }

    /// Delete one of the owner's calculations.
    pub async fn delete(&self, owner_id: &UserId, id: Uuid) -> Result<(), Error> {
        self.load_owned(owner_id, id).await?;
        let removed = self
            .calculation_repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("calculation {id} not found")));
        }

        info!(calculation_id = %id, owner_id = %owner_id, "calculation deleted");
        Ok(())
    }

    async fn load_owned(&self, owner_id: &UserId, id: Uuid) -> Result<Calculation, Error> {
        let calculation = self
            .calculation_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("calculation {id} not found")))?;

        if !calculation.is_owned_by(owner_id) {
            return Err(Error::forbidden(format!(
                "calculation {id} belongs to another user"
            )));
        }
        Ok(calculation)
    }
}

#[cfg(test)]
#[path = "calculation_service_tests.rs"]
mod tests;
