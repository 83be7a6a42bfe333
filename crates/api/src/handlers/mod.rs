pub mod accounts;
pub mod admin;
pub mod auth;
pub mod bans;
pub mod characters;
pub mod downloads;
pub mod news;
pub mod rankings;
pub mod setup;
pub mod wcoin;
