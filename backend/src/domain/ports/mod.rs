//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod calculation_repository;

#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{
    CalculationRepository, CalculationRepositoryError, FixtureCalculationRepository,
};
