use std::sync::Arc;

use warden_core::{
    Authentication, AuthenticationError, AuthenticationStrategy, IdentifierCollection, Realm,
    UsernamePasswordToken,
};

use super::attempt_all;

/// Requires every configured realm to authenticate the token.
///
/// All realms are tried even after a failure so the error lists every cause.
/// On success the account of the first realm is returned and the identifier
/// collection names every realm.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllRealmsSuccessfulStrategy;

impl AllRealmsSuccessfulStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl AuthenticationStrategy for AllRealmsSuccessfulStrategy {
    #[tracing::instrument(
        name = "AllRealmsSuccessfulStrategy::execute",
        skip_all,
        fields(identifier = %token.identifier(), realms = realms.len())
    )]
    fn execute(
        &self,
        token: &UsernamePasswordToken,
        realms: &[Arc<dyn Realm>],
    ) -> Result<Authentication, AuthenticationError> {
        let (successes, errors) = attempt_all(token, realms);
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut identifiers = IdentifierCollection::new();
        for (realm_name, account) in &successes {
            identifiers.add(*realm_name, account.identifier());
        }

        match successes.into_iter().next() {
            Some((_, account)) => Ok(Authentication::new(account, identifiers)),
            None => Err(errors),
        }
    }
}
