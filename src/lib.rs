//! # Warden - Multi-Realm Authentication Library
//!
//! This is a facade crate that re-exports all public APIs from the warden components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warden = { path = "../warden" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `UsernamePasswordToken`, `Credential`, `Account`, `IdentifierCollection`, events
//! - **Ports**: `AccountStore`, `CacheHandler`, `EventBus`, `PasswordVerifier`
//! - **Engine**: `AccountStoreRealm`, the authentication strategies, `DefaultAuthenticator`
//! - **Adapters**: `HashMapAccountStore`, `DashMapCacheHandler`, `DefaultEventBus`, `Argon2PasswordVerifier`
//! - **Setup**: `Settings`, `init_tracing`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, ports and contracts
pub mod core {
    pub use warden_core::*;
}

// Re-export most commonly used core types at the root level
pub use warden_core::{
    Account, Authentication, AuthenticationError, AuthenticationStrategy, AuthorizationInfo,
    Credential, CredentialError, Event, EventPayload, IdentifierCollection, Realm, RealmError,
    RealmFailure, Topic, TokenError, UsernamePasswordToken,
};

// ============================================================================
// Ports
// ============================================================================

/// Collaborator contracts
pub mod ports {
    pub use warden_core::{
        AccountStore, AccountStoreError, CacheError, CacheHandler, EventBus, EventHandler,
        HandlerError, PasswordVerifier, PublishError, SharedHandler,
    };
}

pub use ports::{AccountStore, CacheHandler, EventBus, EventHandler, PasswordVerifier};

// ============================================================================
// Authentication Engine (Application Layer)
// ============================================================================

/// Realms, strategies and the authenticator
pub mod engine {
    pub use warden_application::*;
}

pub use warden_application::{
    AUTHZ_INFO_DOMAIN, AccountStoreRealm, AllRealmsSuccessfulStrategy,
    AtLeastRealmsSuccessfulStrategy, AuthenticatorError, CREDENTIALS_DOMAIN, DefaultAuthenticator,
    FirstRealmSuccessfulStrategy,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// In-memory account storage
    pub mod persistence {
        pub use warden_adapters::persistence::*;
    }

    /// Cache handlers
    pub mod cache {
        pub use warden_adapters::cache::*;
    }

    /// Event bus implementations
    pub mod events {
        pub use warden_adapters::events::*;
    }

    /// Password hashing
    pub mod password {
        pub use warden_adapters::password::*;
    }

    /// Configuration
    pub mod config {
        pub use warden_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use warden_adapters::{
    cache::DashMapCacheHandler,
    config::{Settings, SettingsError, build_strategy},
    events::DefaultEventBus,
    password::Argon2PasswordVerifier,
    persistence::HashMapAccountStore,
    telemetry::init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
