use std::{num::NonZeroUsize, sync::Arc};

use warden_core::{
    Authentication, AuthenticationError, AuthenticationStrategy, IdentifierCollection, Realm,
    UsernamePasswordToken,
};

use super::attempt_all;

/// Succeeds when at least `minimum` realms authenticate the token.
///
/// Every realm is asked. The returned account is the one from the first
/// accepting realm.
#[derive(Debug, Clone, Copy)]
pub struct AtLeastRealmsSuccessfulStrategy {
    minimum: NonZeroUsize,
}

impl AtLeastRealmsSuccessfulStrategy {
    pub fn new(minimum: NonZeroUsize) -> Self {
        Self { minimum }
    }

    pub fn one() -> Self {
        Self::new(NonZeroUsize::MIN)
    }

    pub fn minimum(&self) -> NonZeroUsize {
        self.minimum
    }
}

impl Default for AtLeastRealmsSuccessfulStrategy {
    fn default() -> Self {
        Self::one()
    }
}

impl AuthenticationStrategy for AtLeastRealmsSuccessfulStrategy {
    #[tracing::instrument(
        name = "AtLeastRealmsSuccessfulStrategy::execute",
        skip_all,
        fields(identifier = %token.identifier(), minimum = self.minimum.get())
    )]
    fn execute(
        &self,
        token: &UsernamePasswordToken,
        realms: &[Arc<dyn Realm>],
    ) -> Result<Authentication, AuthenticationError> {
        let (successes, errors) = attempt_all(token, realms);
        if successes.len() < self.minimum.get() {
            tracing::debug!(
                successes = successes.len(),
                "Too few realms accepted the token"
            );
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
