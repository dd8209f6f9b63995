//! Shared helpers for unit tests and the integration suites in `tests/`.
//!
//! Compiled for tests and behind the `test-support` feature.

use std::sync::Arc;

use crate::domain::ports::FixtureLoginService;
use crate::domain::{AgeUnit, PetDraft, PetDraftInput, Species};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    InMemoryAdminDirectory, InMemoryAnnouncementRepository, InMemoryFavoriteRepository,
    InMemoryKeyValueStore, InMemoryNotificationPreferencesRepository, InMemoryPetRepository,
};

/// A valid draft with the given distinguishing attributes.
///
/// # Panics
/// When `name` is blank.
pub fn pet_draft(name: &str, species: Species, age: u32, is_friendly: bool) -> PetDraft {
    PetDraft::try_from(PetDraftInput {
        name: name.to_owned(),
        age,
        age_unit: AgeUnit::Years,
        species,
        is_friendly,
        description: format!("{name} is looking for a home"),
        contact_phone: "+15551234567".to_owned(),
        image_url: format!("https://images.example.com/{}.jpg", name.to_lowercase()),
    })
    .unwrap_or_else(|err| panic!("fixture draft for {name:?} is invalid: {err}"))
}

/// In-memory adapters behind every port, with handles kept for assertions.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub pets: Arc<InMemoryPetRepository>,
    pub favorites: Arc<InMemoryFavoriteRepository>,
    pub device_store: Arc<InMemoryKeyValueStore>,
    pub admins: Arc<InMemoryAdminDirectory>,
    pub announcements: Arc<InMemoryAnnouncementRepository>,
    pub notifications: Arc<InMemoryNotificationPreferencesRepository>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Port bundle using the fixture login (`admin` / `password`).
    pub fn ports(&self) -> HttpStatePorts {
        HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            pets: self.pets.clone(),
            favorites: self.favorites.clone(),
            device_store: self.device_store.clone(),
            admins: self.admins.clone(),
            announcements: self.announcements.clone(),
            notifications: self.notifications.clone(),
        }
    }

    pub fn http_state(&self) -> HttpState {
        HttpState::new(self.ports())
    }
}
