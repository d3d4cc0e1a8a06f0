//! Infrastructure layer: database access and cryptographic utilities

pub mod crypto;
pub mod database;

pub use database::{init_database, DatabaseConfig};
