//! Favourite pets for the current viewer.
//!
//! Signed-in viewers keep favourites as `(user_id, pet_id)` rows on the
//! server. Anonymous viewers keep a JSON array of pet ids in device storage
//! under [`DEVICE_FAVORITES_KEY`]. The mode is chosen from the [`Viewer`] on
//! every load.
//!
//! The durable write always happens before the in-memory set changes; a
//! failed write leaves the set untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{
    FavoriteRepository, FavoriteRepositoryError, KeyValueStore, KeyValueStoreError,
};
use crate::domain::{Error, Pet, PetId, UserId, Viewer};

/// Storage key for device-local favourites.
pub const DEVICE_FAVORITES_KEY: &str = "petpals-favorites";

/// Failure to read or persist favourites.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// Device storage failed.
    #[error("favorite storage failed: {message}")]
    Storage { message: String },
    /// The server-side favourites relation could not be reached.
    #[error("favorites are unavailable: {message}")]
    Unavailable { message: String },
    /// The server-side favourites relation failed while executing a query.
    #[error("favorite sync failed: {message}")]
    Gateway { message: String },
    /// The favourite set could not be serialised.
    #[error("favorite encoding failed: {message}")]
    Encoding { message: String },
}

impl From<KeyValueStoreError> for SyncError {
    fn from(error: KeyValueStoreError) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

impl From<FavoriteRepositoryError> for SyncError {
    fn from(error: FavoriteRepositoryError) -> Self {
        match error {
            FavoriteRepositoryError::Connection { message } => Self::Unavailable { message },
            FavoriteRepositoryError::Query { message } => Self::Gateway { message },
        }
    }
}

impl From<SyncError> for Error {
    fn from(error: SyncError) -> Self {
        match error {
            SyncError::Unavailable { .. } | SyncError::Storage { .. } => {
                Error::service_unavailable(error.to_string())
            }
            SyncError::Gateway { .. } | SyncError::Encoding { .. } => {
                Error::internal(error.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FavoritesMode {
    Device,
    Server(UserId),
}

impl FavoritesMode {
    fn for_viewer(viewer: &Viewer) -> Self {
        viewer
            .user_id
            .clone()
            .map_or(Self::Device, Self::Server)
    }
}

#[derive(Debug)]
struct FavoritesState {
    mode: FavoritesMode,
    ids: BTreeSet<PetId>,
}

/// Owner of the favourite-id set for one viewer.
pub struct FavoritesSynchronizer<F: ?Sized, K: ?Sized> {
    server: Arc<F>,
    device: Arc<K>,
    state: Mutex<FavoritesState>,
}

impl<F, K> FavoritesSynchronizer<F, K>
where
    F: FavoriteRepository + ?Sized,
    K: KeyValueStore + ?Sized,
{
    /// Build a synchroniser for `viewer` and read its durable set.
    pub async fn load(server: Arc<F>, device: Arc<K>, viewer: &Viewer) -> Result<Self, SyncError> {
        let mode = FavoritesMode::for_viewer(viewer);
        let ids = read_set(server.as_ref(), device.as_ref(), &mode).await?;
        Ok(Self {
            server,
            device,
            state: Mutex::new(FavoritesState { mode, ids }),
        })
    }

    /// Replace the set after a sign-in or sign-out.
    ///
    /// The previous identity's favourites are dropped before the new set is
    /// read, so a failed read leaves the set empty rather than stale.
    pub async fn identity_changed(&self, viewer: &Viewer) -> Result<(), SyncError> {
        let mut state = self.state.lock().await;
        state.ids.clear();
        state.mode = FavoritesMode::for_viewer(viewer);
        state.ids = read_set(self.server.as_ref(), self.device.as_ref(), &state.mode).await?;
        Ok(())
    }

    /// Flip membership of `pet_id`, returning the new membership.
    pub async fn toggle(&self, pet_id: PetId) -> Result<bool, SyncError> {
        let mut state = self.state.lock().await;
        let favourite = !state.ids.contains(&pet_id);

        match &state.mode {
            FavoritesMode::Server(user_id) => {
                let written = if favourite {
                    self.server.add(user_id, &pet_id).await
                } else {
                    self.server.remove(user_id, &pet_id).await
                };
                written.map_err(|error| {
                    debug!(%error, %pet_id, "favorite row write failed");
                    SyncError::from(error)
                })?;
            }
            FavoritesMode::Device => {
                let mut next = state.ids.clone();
                if favourite {
                    next.insert(pet_id);
                } else {
                    next.remove(&pet_id);
                }
                write_device_set(self.device.as_ref(), &next).await?;
            }
        }

        if favourite {
            state.ids.insert(pet_id);
        } else {
            state.ids.remove(&pet_id);
        }
        Ok(favourite)
    }

    pub async fn is_favorite(&self, pet_id: &PetId) -> bool {
        self.state.lock().await.ids.contains(pet_id)
    }

    pub async fn favorites(&self) -> BTreeSet<PetId> {
        self.state.lock().await.ids.clone()
    }

    /// Members of `listing` that are favourites, in listing order.
    pub async fn favorite_pets(&self, listing: &[Pet]) -> Vec<Pet> {
        let state = self.state.lock().await;
        listing
            .iter()
            .filter(|pet| state.ids.contains(&pet.id))
            .cloned()
            .collect()
    }
}

async fn read_set<F, K>(
    server: &F,
    device: &K,
    mode: &FavoritesMode,
) -> Result<BTreeSet<PetId>, SyncError>
where
    F: FavoriteRepository + ?Sized,
    K: KeyValueStore + ?Sized,
{
    match mode {
        FavoritesMode::Server(user_id) => {
            let ids = server.list_for_user(user_id).await?;
            Ok(ids.into_iter().collect())
        }
        FavoritesMode::Device => {
            let Some(raw) = device.get(DEVICE_FAVORITES_KEY).await? else {
                return Ok(BTreeSet::new());
            };
            Ok(decode_device_set(&raw))
        }
    }
}

fn decode_device_set(raw: &str) -> BTreeSet<PetId> {
    match serde_json::from_str::<Vec<PetId>>(raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(error) => {
            warn!(%error, "discarding unreadable device favorites");
            BTreeSet::new()
        }
    }
}

async fn write_device_set<K>(device: &K, ids: &BTreeSet<PetId>) -> Result<(), SyncError>
where
    K: KeyValueStore + ?Sized,
{
    let payload = serde_json::to_string(ids).map_err(|err| SyncError::Encoding {
        message: err.to_string(),
    })?;
    device.set(DEVICE_FAVORITES_KEY, &payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        FixtureFavoriteRepository, MockFavoriteRepository, MockKeyValueStore,
    };
    use rstest::rstest;

    fn signed_in() -> Viewer {
        Viewer::user(UserId::random())
    }

    #[rstest]
    #[case(None)]
    #[case(Some("not json".to_owned()))]
    #[case(Some("{\"ids\":[]}".to_owned()))]
    #[tokio::test]
    async fn device_mode_starts_empty_for_missing_or_bad_payload(#[case] stored: Option<String>) {
        let mut device = MockKeyValueStore::new();
        device
            .expect_get()
            .withf(|key| key == DEVICE_FAVORITES_KEY)
            .return_once(move |_| Ok(stored));

        let sync = FavoritesSynchronizer::load(
            Arc::new(FixtureFavoriteRepository),
            Arc::new(device),
            &Viewer::anonymous(),
        )
        .await
        .expect("load succeeds");
        assert!(sync.favorites().await.is_empty());
    }

    #[tokio::test]
    async fn device_toggle_rewrites_whole_set() {
        let existing = PetId::random();
        let added = PetId::random();
        let stored = serde_json::to_string(&[existing]).expect("encode");

        let mut device = MockKeyValueStore::new();
        device.expect_get().return_once(move |_| Ok(Some(stored)));
        device
            .expect_set()
            .withf(move |key, value| {
                let ids: BTreeSet<PetId> = serde_json::from_str(value).unwrap_or_default();
                key == DEVICE_FAVORITES_KEY && ids == BTreeSet::from([existing, added])
            })
            .times(1)
            .return_once(|_, _| Ok(()));

        let sync = FavoritesSynchronizer::load(
            Arc::new(FixtureFavoriteRepository),
            Arc::new(device),
            &Viewer::anonymous(),
        )
        .await
        .expect("load succeeds");

        assert!(sync.toggle(added).await.expect("toggle succeeds"));
        assert!(sync.is_favorite(&added).await);
        assert!(sync.is_favorite(&existing).await);
    }

    #[tokio::test]
    async fn failed_server_write_leaves_set_unchanged() {
        let pet = PetId::random();
        let mut server = MockFavoriteRepository::new();
        server
            .expect_list_for_user()
            .return_once(move |_| Ok(vec![pet]));
        server
            .expect_remove()
            .times(1)
            .return_once(|_, _| Err(FavoriteRepositoryError::connection("down")));

        let sync = FavoritesSynchronizer::load(
            Arc::new(server),
            Arc::new(MockKeyValueStore::new()),
            &signed_in(),
        )
        .await
        .expect("load succeeds");

        let err = sync.toggle(pet).await.expect_err("write fails");
        assert!(matches!(err, SyncError::Unavailable { .. }));
        assert!(sync.is_favorite(&pet).await);
    }

    #[tokio::test]
    async fn sign_out_replaces_server_set_with_device_set() {
        let server_pet = PetId::random();
        let device_pet = PetId::random();
        let stored = serde_json::to_string(&[device_pet]).expect("encode");

        let mut server = MockFavoriteRepository::new();
        server
            .expect_list_for_user()
            .return_once(move |_| Ok(vec![server_pet]));
        let mut device = MockKeyValueStore::new();
        device.expect_get().return_once(move |_| Ok(Some(stored)));

        let sync = FavoritesSynchronizer::load(Arc::new(server), Arc::new(device), &signed_in())
            .await
            .expect("load succeeds");
        sync.identity_changed(&Viewer::anonymous())
            .await
            .expect("reload succeeds");

        assert_eq!(sync.favorites().await, BTreeSet::from([device_pet]));
    }

    #[tokio::test]
    async fn server_load_failure_is_reported() {
        let mut server = MockFavoriteRepository::new();
        server
            .expect_list_for_user()
            .return_once(|_| Err(FavoriteRepositoryError::query("boom")));

        let result = FavoritesSynchronizer::load(
            Arc::new(server),
            Arc::new(MockKeyValueStore::new()),
            &signed_in(),
        )
        .await;
        assert!(matches!(result, Err(SyncError::Gateway { .. })));
    }

    #[rstest]
    #[case::unreachable(FavoriteRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case::failed_query(FavoriteRepositoryError::query("boom"), ErrorCode::InternalError)]
    fn relation_failures_map_to_distinct_status(
        #[case] error: FavoriteRepositoryError,
        #[case] code: ErrorCode,
    ) {
        let error = Error::from(SyncError::from(error));
        assert_eq!(error.code(), code);
    }
}
