pub mod realms;
pub mod strategies;
pub mod use_cases;

pub use realms::{AUTHZ_INFO_DOMAIN, AccountStoreRealm, CREDENTIALS_DOMAIN};
pub use strategies::{
    AllRealmsSuccessfulStrategy, AtLeastRealmsSuccessfulStrategy, FirstRealmSuccessfulStrategy,
};
pub use use_cases::{AuthenticatorError, DefaultAuthenticator};

#[cfg(test)]
pub(crate) mod test_support;
