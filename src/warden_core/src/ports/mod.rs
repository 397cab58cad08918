pub mod cache;
pub mod event_bus;
pub mod repositories;
pub mod services;
