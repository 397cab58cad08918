pub mod cache;
pub mod config;
pub mod events;
pub mod password;
pub mod persistence;
pub mod telemetry;
