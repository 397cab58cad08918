use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::{
        account::Account, identifier_collection::IdentifierCollection,
        token::UsernamePasswordToken,
    },
    events::RealmFailure,
    strategies::realm::{Realm, RealmError},
};

/// A successful authentication: the resolved account plus every realm that
/// vouched for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Authentication {
    account: Account,
    identifiers: IdentifierCollection,
}

impl Authentication {
    pub fn new(account: Account, identifiers: IdentifierCollection) -> Self {
        Self {
            account,
            identifiers,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn identifiers(&self) -> &IdentifierCollection {
        &self.identifiers
    }

    /// Name of the realm that produced the account.
    pub fn realm_name(&self) -> Option<&str> {
        self.identifiers.primary_source()
    }

    pub fn into_account(self) -> Account {
        self.account
    }
}

/// No configured realm accepted the token.
///
/// Holds one entry per realm that was attempted and failed, in the order the
/// realms were tried.
#[derive(Debug, Error)]
#[error("Authentication failed for `{identifier}`: {} realm(s) rejected the token", .failures.len())]
pub struct AuthenticationError {
    identifier: String,
    failures: Vec<(String, RealmError)>,
}

impl AuthenticationError {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, realm_name: impl Into<String>, error: RealmError) {
        self.failures.push((realm_name.into(), error));
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn failures(&self) -> &[(String, RealmError)] {
        &self.failures
    }

    pub fn failure_for(&self, realm_name: &str) -> Option<&RealmError> {
        self.failures
            .iter()
            .find(|(name, _)| name == realm_name)
            .map(|(_, error)| error)
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Flatten the causes into the form carried by failure events.
    pub fn realm_failures(&self) -> Vec<RealmFailure> {
        self.failures
            .iter()
            .map(|(realm_name, error)| RealmFailure {
                realm_name: realm_name.clone(),
                error: error.to_string(),
            })
            .collect()
    }
}

/// Policy combining the results of several realms into one decision.
pub trait AuthenticationStrategy: Send + Sync {
    fn execute(
        &self,
        token: &UsernamePasswordToken,
        realms: &[Arc<dyn Realm>],
    ) -> Result<Authentication, AuthenticationError>;
}

impl<S: AuthenticationStrategy + ?Sized> AuthenticationStrategy for Box<S> {
    fn execute(
        &self,
        token: &UsernamePasswordToken,
        realms: &[Arc<dyn Realm>],
    ) -> Result<Authentication, AuthenticationError> {
        (**self).execute(token, realms)
    }
}

impl<S: AuthenticationStrategy + ?Sized> AuthenticationStrategy for Arc<S> {
    fn execute(
        &self,
        token: &UsernamePasswordToken,
        realms: &[Arc<dyn Realm>],
    ) -> Result<Authentication, AuthenticationError> {
        (**self).execute(token, realms)
    }
}
