//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed calculation repository using Diesel.

pub mod persistence;
