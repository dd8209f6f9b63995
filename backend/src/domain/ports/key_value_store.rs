//! Port for small, device-local string storage.

use std::sync::Arc;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// Key contains characters the store cannot address.
        InvalidKey { key: String } => "invalid storage key: {key}",
        /// Reading or writing the underlying medium failed.
        Io { message: String } => "key-value store i/o failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `None` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

/// Keys accepted by every adapter: non-empty ASCII letters, digits, `.`, `_`
/// and `-`, not starting with a dot.
pub fn validate_key(key: &str) -> Result<(), KeyValueStoreError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if key.is_empty() || key.starts_with('.') || !key.chars().all(allowed) {
        return Err(KeyValueStoreError::invalid_key(key));
    }
    Ok(())
}

/// Store that namespaces every key as `{scope}.{key}` inside another store.
///
/// Lets one shared medium hold a separate key space per device.
pub struct ScopedKeyValueStore<K: ?Sized> {
    inner: Arc<K>,
    scope: String,
}

impl<K: ?Sized> ScopedKeyValueStore<K> {
    /// `scope` must itself be a valid key; otherwise every access fails with
    /// [`KeyValueStoreError::InvalidKey`].
    pub fn new(inner: Arc<K>, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    fn scoped(&self, key: &str) -> Result<String, KeyValueStoreError> {
        validate_key(key)?;
        let scoped = format!("{}.{key}", self.scope);
        validate_key(&scoped)?;
        Ok(scoped)
    }
}

#[async_trait]
impl<K> KeyValueStore for ScopedKeyValueStore<K>
where
    K: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        self.inner.get(&self.scoped(key)?).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.inner.set(&self.scoped(key)?, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.inner.remove(&self.scoped(key)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("petpals-favorites", true)]
    #[case("a.b_c-1", true)]
    #[case("", false)]
    #[case(".hidden", false)]
    #[case("../escape", false)]
    #[case("with space", false)]
    fn key_validation(#[case] key: &str, #[case] ok: bool) {
        assert_eq!(validate_key(key).is_ok(), ok);
    }

    #[tokio::test]
    async fn scoped_store_prefixes_keys() {
        let mut inner = MockKeyValueStore::new();
        inner
            .expect_set()
            .withf(|key, value| key == "device-1.petpals-favorites" && value == "[]")
            .times(1)
            .returning(|_, _| Ok(()));
        inner
            .expect_get()
            .withf(|key| key == "device-1.petpals-favorites")
            .times(1)
            .returning(|_| Ok(Some("[]".into())));
        let store = ScopedKeyValueStore::new(Arc::new(inner), "device-1");
        store.set("petpals-favorites", "[]").await.expect("set");
        assert_eq!(
            store.get("petpals-favorites").await.expect("get"),
            Some("[]".into())
        );
    }

    #[rstest]
    #[case::bad_scope("../up", "petpals-favorites")]
    #[case::bad_key("device-1", "../escape")]
    #[tokio::test]
    async fn scoped_store_rejects_unaddressable_keys(#[case] scope: &str, #[case] key: &str) {
        let mut inner = MockKeyValueStore::new();
        inner.expect_get().never();
        let store = ScopedKeyValueStore::new(Arc::new(inner), scope);
        let err = store.get(key).await.expect_err("key should be rejected");
        assert!(matches!(err, KeyValueStoreError::InvalidKey { .. }));
    }
}
