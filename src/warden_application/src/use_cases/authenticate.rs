use std::sync::Arc;

use warden_core::{
    Authentication, AuthenticationError, AuthenticationStrategy, EventBus, EventPayload, Realm,
    Topic, UsernamePasswordToken,
};

/// Error types for the authenticate use case
#[derive(Debug, thiserror::Error)]
pub enum AuthenticatorError {
    #[error("Illegal state: {0}")]
    IllegalState(String),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
}

/// Authenticator - runs a strategy over the configured realms and announces
/// the outcome on the event bus
pub struct DefaultAuthenticator<S, B>
where
    S: AuthenticationStrategy,
    B: EventBus,
{
    strategy: S,
    realms: Vec<Arc<dyn Realm>>,
    event_bus: B,
}

impl<S, B> DefaultAuthenticator<S, B>
where
    S: AuthenticationStrategy,
    B: EventBus,
{
    /// Realm order is significant: strategies try realms in this order.
    pub fn new(strategy: S, realms: Vec<Arc<dyn Realm>>, event_bus: B) -> Self {
        Self {
            strategy,
            realms,
            event_bus,
        }
    }

    pub fn realms(&self) -> &[Arc<dyn Realm>] {
        &self.realms
    }

    pub fn event_bus(&self) -> &B {
        &self.event_bus
    }

    /// Authenticate a token against the configured realms
    ///
    /// # Arguments
    /// * `token` - Credentials submitted for this attempt
    ///
    /// # Returns
    /// The authenticated account and the identifiers of the realms that
    /// accepted it, or the aggregated per-realm failures.
    ///
    /// The success or failure event is published before this returns.
    /// Subscriber failures are logged and never change the result.
    #[tracing::instrument(
        name = "DefaultAuthenticator::authenticate",
        skip_all,
        fields(identifier = %token.identifier())
    )]
    pub fn authenticate(
        &self,
        token: &UsernamePasswordToken,
    ) -> Result<Authentication, AuthenticatorError> {
        if self.realms.is_empty() {
            return Err(AuthenticatorError::IllegalState(
                "no realms configured for authentication".to_string(),
            ));
        }

        match self.strategy.execute(token, &self.realms) {
            Ok(authentication) => {
                let realm_name = self.winning_realm(&authentication);
                tracing::info!(realm = realm_name, "Authentication succeeded");
                self.notify(
                    Topic::AuthenticationSucceeded,
                    EventPayload::AuthenticationSucceeded {
                        identifier: token.identifier().to_string(),
                        realm_name: realm_name.to_string(),
                    },
                );
                Ok(authentication)
            }
            Err(error) => {
                tracing::info!(failures = error.len(), "Authentication failed");
                self.notify(
                    Topic::AuthenticationFailed,
                    EventPayload::AuthenticationFailed {
                        identifier: token.identifier().to_string(),
                        errors: error.realm_failures(),
                    },
                );
                Err(error.into())
            }
        }
    }

    /// Realm credited in the success event. A strategy that reports no
    /// identifiers is credited to the first configured realm.
    fn winning_realm<'a>(&'a self, authentication: &'a Authentication) -> &'a str {
        authentication.realm_name().unwrap_or_else(|| {
            tracing::warn!("Strategy reported no identifiers, crediting first realm");
            self.realms.first().map(|realm| realm.name()).unwrap_or_default()
        })
    }

    fn notify(&self, topic: Topic, payload: EventPayload) {
        if let Err(e) = self.event_bus.publish(topic, payload) {
            tracing::warn!(error = %e, "Failed to deliver authentication event");
        }
    }
}
