//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types and hold no
//! business logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; connections come from a `bb8`
//! pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use calc_backend::outbound::persistence::{DbPool, DieselCalculationRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/calc")).await?;
//! let repository = DieselCalculationRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_calculation_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_calculation_repository::DieselCalculationRepository;
pub use migrations::{run_pending_migrations, MigrationError, MIGRATIONS};
pub use pool::{DbPool, PoolConfig, PoolError};
