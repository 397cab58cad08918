pub mod all_realms_successful;
pub mod at_least_realms_successful;
pub mod first_realm_successful;

use std::sync::Arc;

use warden_core::{Account, AuthenticationError, Realm, UsernamePasswordToken};

pub use all_realms_successful::AllRealmsSuccessfulStrategy;
pub use at_least_realms_successful::AtLeastRealmsSuccessfulStrategy;
pub use first_realm_successful::FirstRealmSuccessfulStrategy;

/// Ask every realm in order, keeping both the successes and the failures.
fn attempt_all<'r>(
    token: &UsernamePasswordToken,
    realms: &'r [Arc<dyn Realm>],
) -> (Vec<(&'r str, Account)>, AuthenticationError) {
    let mut successes = Vec::new();
    let mut errors = AuthenticationError::new(token.identifier());

    for realm in realms {
        match realm.get_account(token) {
            Ok(account) => {
                tracing::debug!(realm = realm.name(), "Realm accepted token");
                successes.push((realm.name(), account));
            }
            Err(e) => {
                tracing::debug!(realm = realm.name(), error = %e, "Realm rejected token");
                errors.record(realm.name(), e);
            }
        }
    }

    (successes, errors)
}
