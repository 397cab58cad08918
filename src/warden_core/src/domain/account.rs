use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::credential::Credential;

/// Roles and permissions granted to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationInfo {
    roles: BTreeSet<String>,
    permissions: BTreeSet<String>,
}

impl AuthorizationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_permitted(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// An identity resolved by a realm.
///
/// `authz_info` stays `None` when the account comes out of credential
/// resolution; authorization data is loaded separately when it is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    identifier: String,
    credentials: Credential,
    authz_info: Option<AuthorizationInfo>,
    attributes: HashMap<String, serde_json::Value>,
}

impl Account {
    pub fn new(identifier: impl Into<String>, credentials: Credential) -> Self {
        Self {
            identifier: identifier.into(),
            credentials,
            authz_info: None,
            attributes: HashMap::new(),
        }
    }

    pub fn with_authz_info(mut self, authz_info: AuthorizationInfo) -> Self {
        self.authz_info = Some(authz_info);
        self
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn credentials(&self) -> &Credential {
        &self.credentials
    }

    pub fn authz_info(&self) -> Option<&AuthorizationInfo> {
        self.authz_info.as_ref()
    }

    pub fn attributes(&self) -> &HashMap<String, serde_json::Value> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }
}
