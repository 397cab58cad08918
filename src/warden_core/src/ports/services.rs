use secrecy::Secret;

use crate::domain::credential::Credential;

/// Checks a plaintext secret against a stored credential.
///
/// Implementations compare digests in constant time and report any mismatch,
/// including an undecodable credential, as `false`.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, plaintext: &Secret<String>, credential: &Credential) -> bool;
}
