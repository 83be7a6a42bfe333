//! Domain types and pure game-rule logic for the MU Online web portal.
//!
//! This crate has no database or HTTP dependencies. Everything here is
//! shared between the data-access layer (`muweb-db`) and the API binary
//! (`muweb-api`).

pub mod classes;
pub mod error;
pub mod pagination;
pub mod reset;
pub mod roles;
pub mod setup;
pub mod types;
