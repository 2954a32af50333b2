//! Stored arithmetic calculations owned by users.
//!
//! - [`domain`]: the calculation entity, its factory and evaluator, the
//!   repository port and the owning service.
//! - [`outbound`]: the Diesel/PostgreSQL repository adapter and migrations.
//! - [`config`] and [`cli`]: settings and command surface of the `calc`
//!   binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;
