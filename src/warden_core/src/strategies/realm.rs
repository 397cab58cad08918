use thiserror::Error;

use crate::{
    domain::{account::Account, credential::CredentialError, token::UsernamePasswordToken},
    ports::{cache::CacheError, repositories::AccountStoreError},
};

#[derive(Debug, Error)]
pub enum RealmError {
    #[error("No account found for `{0}`")]
    UnknownAccount(String),
    #[error("Submitted credentials for `{0}` did not match")]
    IncorrectCredentials(String),
    #[error("{0}")]
    MalformedCredential(#[from] CredentialError),
    #[error("{0}")]
    AccountStore(AccountStoreError),
    #[error("{0}")]
    Cache(#[from] CacheError),
}

impl From<AccountStoreError> for RealmError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::MalformedCredential(e) => Self::MalformedCredential(e),
            other => Self::AccountStore(other),
        }
    }
}

impl PartialEq for RealmError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UnknownAccount(a), Self::UnknownAccount(b)) => a == b,
            (Self::IncorrectCredentials(a), Self::IncorrectCredentials(b)) => a == b,
            (Self::MalformedCredential(a), Self::MalformedCredential(b)) => a == b,
            (Self::AccountStore(a), Self::AccountStore(b)) => a == b,
            (Self::Cache(_), Self::Cache(_)) => true,
            _ => false,
        }
    }
}

/// A source of identity truth plus the logic to check a token against it.
pub trait Realm: Send + Sync {
    /// Name recorded in identifier collections, error mappings and events.
    fn name(&self) -> &str;

    /// Resolve the token's identifier to an account and verify the submitted
    /// secret against it.
    fn get_account(&self, token: &UsernamePasswordToken) -> Result<Account, RealmError>;
}
