use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cached value in domain `{domain}` has an unexpected type")]
    TypeMismatch { domain: String },
    #[error("Unexpected cache error: {0}")]
    UnexpectedError(String),
}

/// Memoizes expensive lookups keyed by `(domain, identifier)`.
///
/// Implementations must run `creator` at most once per key while a value is
/// being populated: concurrent callers asking for the same key wait for the
/// first computation instead of starting their own. A creator returning
/// `Ok(None)` or an error leaves the key empty.
pub trait CacheHandler: Send + Sync {
    fn get_or_create<V, E, F>(&self, domain: &str, identifier: &str, creator: F) -> Result<Option<V>, E>
    where
        V: Clone + Send + Sync + 'static,
        E: From<CacheError>,
        F: FnOnce() -> Result<Option<V>, E>;

    fn delete(&self, domain: &str, identifier: &str) -> Result<(), CacheError>;
}

impl<C: CacheHandler> CacheHandler for Arc<C> {
    fn get_or_create<V, E, F>(&self, domain: &str, identifier: &str, creator: F) -> Result<Option<V>, E>
    where
        V: Clone + Send + Sync + 'static,
        E: From<CacheError>,
        F: FnOnce() -> Result<Option<V>, E>,
    {
        (**self).get_or_create(domain, identifier, creator)
    }

    fn delete(&self, domain: &str, identifier: &str) -> Result<(), CacheError> {
        (**self).delete(domain, identifier)
    }
}
