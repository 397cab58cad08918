use warden_core::{
    Account, AccountStore, AuthorizationInfo, CacheHandler, IdentifierCollection,
    PasswordVerifier, Realm, RealmError, UsernamePasswordToken,
};

/// Cache domain holding accounts resolved for authentication.
pub const CREDENTIALS_DOMAIN: &str = "credentials";
/// Cache domain holding authorization info, populated on first use.
pub const AUTHZ_INFO_DOMAIN: &str = "authz_info";

/// Realm backed by an [`AccountStore`], with lookups memoized through a
/// [`CacheHandler`].
///
/// The realm keeps no state of its own; eviction and expiry belong to the
/// cache handler.
pub struct AccountStoreRealm<A, C, V>
where
    A: AccountStore,
    C: CacheHandler,
    V: PasswordVerifier,
{
    name: String,
    account_store: A,
    cache_handler: C,
    verifier: V,
}

impl<A, C, V> AccountStoreRealm<A, C, V>
where
    A: AccountStore,
    C: CacheHandler,
    V: PasswordVerifier,
{
    pub fn new(name: impl Into<String>, account_store: A, cache_handler: C, verifier: V) -> Self {
        Self {
            name: name.into(),
            account_store,
            cache_handler,
            verifier,
        }
    }

    pub fn account_store(&self) -> &A {
        &self.account_store
    }

    pub fn cache_handler(&self) -> &C {
        &self.cache_handler
    }

    /// Load authorization info for the identifier this realm contributed to
    /// `identifiers`. Returns `Ok(None)` if this realm did not take part in the
    /// authentication or the store has no record.
    #[tracing::instrument(name = "AccountStoreRealm::get_authorization_info", skip_all, fields(realm = %self.name))]
    pub fn get_authorization_info(
        &self,
        identifiers: &IdentifierCollection,
    ) -> Result<Option<AuthorizationInfo>, RealmError> {
        let Some(identifier) = identifiers.from_realm(&self.name).next() else {
            tracing::debug!("No identifier from this realm");
            return Ok(None);
        };

        self.cache_handler
            .get_or_create(AUTHZ_INFO_DOMAIN, identifier, || {
                self.account_store
                    .get_authz_info(identifier)
                    .map_err(RealmError::from)
            })
    }

    pub fn clear_cached_credentials(&self, identifier: &str) -> Result<(), RealmError> {
        self.cache_handler
            .delete(CREDENTIALS_DOMAIN, identifier)
            .map_err(RealmError::from)
    }

    pub fn clear_cached_authorization_info(&self, identifier: &str) -> Result<(), RealmError> {
        self.cache_handler
            .delete(AUTHZ_INFO_DOMAIN, identifier)
            .map_err(RealmError::from)
    }
}

impl<A, C, V> Realm for AccountStoreRealm<A, C, V>
where
    A: AccountStore,
    C: CacheHandler,
    V: PasswordVerifier,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(
        name = "AccountStoreRealm::get_account",
        skip_all,
        fields(realm = %self.name, identifier = %token.identifier())
    )]
    fn get_account(&self, token: &UsernamePasswordToken) -> Result<Account, RealmError> {
        let identifier = token.identifier();

        let account = self
            .cache_handler
            .get_or_create(CREDENTIALS_DOMAIN, identifier, || {
                tracing::debug!("Loading credentials from account store");
                self.account_store
                    .get_credentials(identifier)
                    .map_err(RealmError::from)
            })?
            .ok_or_else(|| RealmError::UnknownAccount(identifier.to_string()))?;

        if !self.verifier.verify(token.secret(), account.credentials()) {
            return Err(RealmError::IncorrectCredentials(identifier.to_string()));
        }

        Ok(account)
    }
}
