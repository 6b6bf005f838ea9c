//! Diesel models registered as repository entities.

pub mod client;
pub mod config;
pub mod manager;
