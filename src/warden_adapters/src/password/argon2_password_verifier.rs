use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier as _, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use warden_core::{Credential, CredentialError, PasswordVerifier};

use crate::config::PasswordSettings;

#[derive(Debug, Error)]
pub enum PasswordHashingError {
    #[error("Invalid argon2 parameters: {0}")]
    InvalidParams(String),
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("{0}")]
    Credential(#[from] CredentialError),
}

/// Argon2id hashing and verification.
///
/// The configured parameters only apply to new hashes; verification always
/// uses the scheme, parameters and salt encoded in the stored credential.
#[derive(Debug, Clone)]
pub struct Argon2PasswordVerifier {
    params: Params,
}

impl Argon2PasswordVerifier {
    pub fn new(
        memory_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashingError> {
        let params = Params::new(memory_cost_kib, time_cost, parallelism, None)
            .map_err(|e| PasswordHashingError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    pub fn from_settings(settings: &PasswordSettings) -> Result<Self, PasswordHashingError> {
        Self::new(
            settings.memory_cost_kib,
            settings.time_cost,
            settings.parallelism,
        )
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    #[tracing::instrument(name = "Computing password hash", skip_all)]
    pub fn hash_password(
        &self,
        plaintext: &Secret<String>,
    ) -> Result<Credential, PasswordHashingError> {
        let salt = SaltString::generate(rand_core::OsRng);
        let hash = self
            .hasher()
            .hash_password(plaintext.expose_secret().as_bytes(), &salt)
            .map_err(|e| PasswordHashingError::HashingFailed(e.to_string()))?;

        Ok(Credential::parse(hash.to_string())?)
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    #[tracing::instrument(name = "Verify password hash", skip_all, fields(scheme = credential.scheme()))]
    fn verify(&self, plaintext: &Secret<String>, credential: &Credential) -> bool {
        let expected = match credential.password_hash() {
            Ok(expected) => expected,
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential could not be decoded");
                return false;
            }
        };

        self.hasher()
            .verify_password(plaintext.expose_secret().as_bytes(), &expected)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> Argon2PasswordVerifier {
        // Cheap parameters keep the tests fast
        Argon2PasswordVerifier::new(1024, 1, 1).unwrap()
    }

    fn secret(value: &str) -> Secret<String> {
        Secret::new(value.to_string())
    }

    #[test]
    fn verifies_hash_it_produced() {
        let verifier = verifier();
        let credential = verifier.hash_password(&secret("correct")).unwrap();

        assert_eq!(credential.scheme(), "argon2id");
        assert!(verifier.verify(&secret("correct"), &credential));
        assert!(!verifier.verify(&secret("wrong"), &credential));
    }

    #[test]
    fn verification_is_deterministic() {
        let verifier = verifier();
        let credential = verifier.hash_password(&secret("correct")).unwrap();

        let first = verifier.verify(&secret("correct"), &credential);
        let second_wrong = verifier.verify(&secret("wrong"), &credential);
        for _ in 0..5 {
            assert_eq!(verifier.verify(&secret("correct"), &credential), first);
            assert_eq!(verifier.verify(&secret("wrong"), &credential), second_wrong);
        }
    }

    #[test]
    fn uses_parameters_stored_in_the_credential() {
        let credential = verifier().hash_password(&secret("correct")).unwrap();
        let other = Argon2PasswordVerifier::new(2048, 2, 1).unwrap();

        assert!(other.verify(&secret("correct"), &credential));
    }

    #[test]
    fn same_password_gets_fresh_salt() {
        let verifier = verifier();
        let a = verifier.hash_password(&secret("correct")).unwrap();
        let b = verifier.hash_password(&secret("correct")).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let result = Argon2PasswordVerifier::from_settings(&PasswordSettings {
            memory_cost_kib: 1,
            time_cost: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordHashingError::InvalidParams(_))));
    }
}
