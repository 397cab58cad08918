use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use warden_core::{Account, AccountStore, AccountStoreError, AuthorizationInfo};

/// In-memory account store. Clones share the same data.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    authz_info: Arc<RwLock<HashMap<String, AuthorizationInfo>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            authz_info: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(account.identifier()) {
            return Err(AccountStoreError::AccountAlreadyExists(
                account.identifier().to_string(),
            ));
        }
        accounts.insert(account.identifier().to_string(), account);
        Ok(())
    }

    pub fn set_authorization_info(
        &self,
        identifier: &str,
        authz_info: AuthorizationInfo,
    ) -> Result<(), AccountStoreError> {
        if !self.accounts.read().map_err(poisoned)?.contains_key(identifier) {
            return Err(AccountStoreError::AccountNotFound(identifier.to_string()));
        }
        self.authz_info
            .write()
            .map_err(poisoned)?
            .insert(identifier.to_string(), authz_info);
        Ok(())
    }

    pub fn remove_account(&self, identifier: &str) -> Result<Account, AccountStoreError> {
        let account = self
            .accounts
            .write()
            .map_err(poisoned)?
            .remove(identifier)
            .ok_or_else(|| AccountStoreError::AccountNotFound(identifier.to_string()))?;
        self.authz_info.write().map_err(poisoned)?.remove(identifier);
        Ok(account)
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}

impl AccountStore for HashMapAccountStore {
    fn get_credentials(&self, identifier: &str) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.get(identifier).cloned())
    }

    fn get_authz_info(
        &self,
        identifier: &str,
    ) -> Result<Option<AuthorizationInfo>, AccountStoreError> {
        let authz_info = self.authz_info.read().map_err(poisoned)?;
        Ok(authz_info.get(identifier).cloned())
    }
}
