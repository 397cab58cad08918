pub mod account_store_realm;

pub use account_store_realm::{AUTHZ_INFO_DOMAIN, AccountStoreRealm, CREDENTIALS_DOMAIN};
