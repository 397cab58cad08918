pub mod domain;
pub mod events;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AuthorizationInfo},
    credential::{Credential, CredentialError},
    identifier_collection::IdentifierCollection,
    token::{TokenError, UsernamePasswordToken},
};

pub use events::{Event, EventPayload, RealmFailure, Topic};

pub use ports::{
    cache::{CacheError, CacheHandler},
    event_bus::{EventBus, EventHandler, HandlerError, PublishError, SharedHandler},
    repositories::{AccountStore, AccountStoreError},
    services::PasswordVerifier,
};

pub use strategies::{
    authentication_strategy::{Authentication, AuthenticationError, AuthenticationStrategy},
    realm::{Realm, RealmError},
};
