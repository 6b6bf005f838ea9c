//! Data transfer objects returned by services.

pub mod client;
