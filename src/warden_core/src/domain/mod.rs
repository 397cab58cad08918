pub mod account;
pub mod credential;
pub mod identifier_collection;
pub mod token;
