pub mod auth;
pub mod client;
pub mod rbac;
pub mod setup_guard;
