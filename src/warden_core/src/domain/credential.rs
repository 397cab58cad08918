use std::fmt;

use argon2::{Algorithm, password_hash::PasswordHash};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Malformed credential: {0}")]
    Malformed(String),
}

/// A stored Argon2 password hash in PHC string format
/// (`$<scheme>$v=<version>$<params>$<salt>$<digest>`). Schemes outside the
/// argon2 family are rejected.
///
/// The encoding is checked once on construction; the scheme, cost parameters,
/// salt and digest are decoded again only when a verifier asks for them.
#[derive(Clone)]
pub struct Credential {
    encoded: Secret<String>,
    scheme: String,
}

impl Credential {
    pub fn parse(encoded: impl Into<String>) -> Result<Self, CredentialError> {
        let encoded = encoded.into();
        let scheme = {
            let hash = decode(&encoded)?;
            hash.algorithm.as_str().to_owned()
        };

        Ok(Self {
            encoded: Secret::new(encoded),
            scheme,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Decode the stored string into its PHC components.
    pub fn password_hash(&self) -> Result<PasswordHash<'_>, CredentialError> {
        decode(self.encoded.expose_secret())
    }

    pub fn as_encoded(&self) -> &Secret<String> {
        &self.encoded
    }
}

fn decode(encoded: &str) -> Result<PasswordHash<'_>, CredentialError> {
    let hash = PasswordHash::new(encoded).map_err(|e| CredentialError::Malformed(e.to_string()))?;

    if hash.algorithm.as_str().parse::<Algorithm>().is_err() {
        return Err(CredentialError::Malformed(format!(
            "unsupported scheme `{}`",
            hash.algorithm
        )));
    }

    if hash.params.is_empty() {
        return Err(CredentialError::Malformed(
            "missing cost parameters".to_string(),
        ));
    }
    if hash.salt.is_none() {
        return Err(CredentialError::Malformed("missing salt".to_string()));
    }
    if hash.hash.is_none() {
        return Err(CredentialError::Malformed("missing digest".to_string()));
    }

    Ok(hash)
}

impl TryFrom<String> for Credential {
    type Error = CredentialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.encoded.expose_secret() == other.encoded.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("scheme", &self.scheme)
            .field("encoded", &"[REDACTED]")
            .finish()
    }
}
