//! # Surgical Operation Logbook
//!
//! REST API and mobile-style web front end for recording surgical operations.
//!
//! ## Architecture
//!
//! The project follows a layered layout:
//!
//! - **config**: TOML application configuration
//! - **infrastructure**: external concerns (database, migrations, crypto)
//! - **interfaces**: the HTTP surface (router, middleware, resource modules)
//!
//! The shipped binary serves the JSON API under `/api`, Swagger UI under
//! `/docs`, and the static web client from the `web/` directory.

pub mod config;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
