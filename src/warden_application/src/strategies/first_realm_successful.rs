use std::sync::Arc;

use warden_core::{
    Authentication, AuthenticationError, AuthenticationStrategy, IdentifierCollection, Realm,
    UsernamePasswordToken,
};

/// Accepts the first realm that authenticates the token.
///
/// Realms are tried in declaration order. Once one succeeds, the realms after
/// it are never asked. Every failure before the winner is recorded; if no
/// realm succeeds the error holds one entry per realm.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstRealmSuccessfulStrategy;

impl FirstRealmSuccessfulStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl AuthenticationStrategy for FirstRealmSuccessfulStrategy {
    #[tracing::instrument(
        name = "FirstRealmSuccessfulStrategy::execute",
        skip_all,
        fields(identifier = %token.identifier(), realms = realms.len())
    )]
    fn execute(
        &self,
        token: &UsernamePasswordToken,
        realms: &[Arc<dyn Realm>],
    ) -> Result<Authentication, AuthenticationError> {
        let mut errors = AuthenticationError::new(token.identifier());

        for realm in realms {
            match realm.get_account(token) {
                Ok(account) => {
                    tracing::debug!(realm = realm.name(), "Realm accepted token");
                    let identifiers =
                        IdentifierCollection::from_source(realm.name(), account.identifier());
                    return Ok(Authentication::new(account, identifiers));
                }
                Err(e) => {
                    tracing::debug!(realm = realm.name(), error = %e, "Realm rejected token");
                    errors.record(realm.name(), e);
                }
            }
        }

        Err(errors)
    }
}
