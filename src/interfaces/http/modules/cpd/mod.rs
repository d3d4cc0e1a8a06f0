//! CPD module — request schema only, ahead of the CPD feature
//!
//! The `cpd_entries` table and this DTO ship with the schema; no routes are
//! wired yet.

pub mod dto;

pub use dto::*;
