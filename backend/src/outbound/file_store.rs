//! Directory-backed `KeyValueStore` for device-local state.
//!
//! Each key is one UTF-8 file inside a directory opened through `cap_std`, so
//! the store cannot reach outside it. Writes go to a dot-prefixed temporary
//! file and are renamed into place. Dot-prefixed names are never valid keys.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, validate_key};

#[derive(Clone)]
pub struct CapStdKeyValueStore {
    dir: Arc<Dir>,
}

impl CapStdKeyValueStore {
    /// Open `path`, creating it first when missing.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use petpals::outbound::file_store::CapStdKeyValueStore;
    ///
    /// let store = CapStdKeyValueStore::open("/var/lib/petpals/device")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, KeyValueStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> io::Result<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(&dir))
            .await
            .map_err(|err| KeyValueStoreError::io(err.to_string()))?
            .map_err(|err| {
                debug!(error = %err, "device store i/o failed");
                KeyValueStoreError::io(err.to_string())
            })
    }
}

fn temp_name(key: &str) -> PathBuf {
    PathBuf::from(format!(".{key}.tmp"))
}

#[async_trait]
impl KeyValueStore for CapStdKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        validate_key(key)?;
        let name = PathBuf::from(key);
        self.blocking(move |dir| match dir.read_to_string(&name) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        validate_key(key)?;
        let name = PathBuf::from(key);
        let temp = temp_name(key);
        let value = value.to_owned();
        self.blocking(move |dir| {
            dir.write(&temp, value.as_bytes())?;
            dir.rename(&temp, dir, &name)
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        validate_key(key)?;
        let name = PathBuf::from(key);
        self.blocking(move |dir| match dir.remove_file(&name) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
        .await
    }
}
