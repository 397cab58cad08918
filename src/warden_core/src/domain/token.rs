use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Identifier must not be empty")]
    EmptyIdentifier,
    #[error("Secret must not be empty")]
    EmptySecret,
}

/// Credentials submitted for a single authentication attempt.
#[derive(Debug, Clone)]
pub struct UsernamePasswordToken {
    identifier: String,
    secret: Secret<String>,
    host: Option<String>,
    remember_me: bool,
}

impl UsernamePasswordToken {
    pub fn new(identifier: impl Into<String>, secret: Secret<String>) -> Result<Self, TokenError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(TokenError::EmptyIdentifier);
        }
        if secret.expose_secret().is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            identifier,
            secret,
            host: None,
            remember_me: false,
        })
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &Secret<String> {
        &self.secret
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn is_remember_me(&self) -> bool {
        self.remember_me
    }
}
