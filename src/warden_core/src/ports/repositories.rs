use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    account::{Account, AuthorizationInfo},
    credential::CredentialError,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account `{0}` already exists")]
    AccountAlreadyExists(String),
    #[error("Account `{0}` not found")]
    AccountNotFound(String),
    #[error("Account store unavailable: {0}")]
    Unavailable(String),
    #[error("Stored credential is unusable: {0}")]
    MalformedCredential(#[from] CredentialError),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists(a), Self::AccountAlreadyExists(b)) => a == b,
            (Self::AccountNotFound(a), Self::AccountNotFound(b)) => a == b,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            (Self::MalformedCredential(a), Self::MalformedCredential(b)) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Source of account records. `Ok(None)` means the identifier is unknown.
///
/// Stores that keep encoded hashes build the account's [`Credential`] with
/// `Credential::parse(..)?`; a corrupt hash then surfaces as
/// [`AccountStoreError::MalformedCredential`].
///
/// [`Credential`]: crate::domain::credential::Credential
pub trait AccountStore: Send + Sync {
    fn get_credentials(&self, identifier: &str) -> Result<Option<Account>, AccountStoreError>;
    fn get_authz_info(
        &self,
        identifier: &str,
    ) -> Result<Option<AuthorizationInfo>, AccountStoreError>;
}

impl<A: AccountStore + ?Sized> AccountStore for Arc<A> {
    fn get_credentials(&self, identifier: &str) -> Result<Option<Account>, AccountStoreError> {
        (**self).get_credentials(identifier)
    }

    fn get_authz_info(
        &self,
        identifier: &str,
    ) -> Result<Option<AuthorizationInfo>, AccountStoreError> {
        (**self).get_authz_info(identifier)
    }
}
