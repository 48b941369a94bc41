//! Common test utilities for all integration tests.
//!
//! Provides shared test database setup and schema inspection helpers.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

pub mod db_metadata;
pub mod test_db;
