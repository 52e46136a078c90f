//! # agrolink-database
//!
//! PostgreSQL access layer: connection pool construction, the migration
//! runner, and one repository per aggregate.
//!
//! Repositories own a [`sqlx::PgPool`]. Writes that must participate in a
//! multi-statement verification transition additionally expose `*_in_tx`
//! variants taking `&mut sqlx::PgConnection`, so services can compose them
//! inside one transaction.

pub mod connection;
pub mod migration;
pub mod repositories;
