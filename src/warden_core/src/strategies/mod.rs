pub mod authentication_strategy;
pub mod realm;
