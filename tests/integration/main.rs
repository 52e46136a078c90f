//! Integration tests for the Agrolink API.
//!
//! These tests drive the full router over a real PostgreSQL database.
//! They skip (with a note on stderr) when `TEST_DATABASE_URL` is not set.

mod helpers;

mod admin_test;
mod auth_test;
mod rating_test;
mod verification_test;
