pub mod authenticate;

// Re-export for convenience
pub use authenticate::{AuthenticatorError, DefaultAuthenticator};
