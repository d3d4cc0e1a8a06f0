//! Operations module — logbook CRUD, search/pagination and statistics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
