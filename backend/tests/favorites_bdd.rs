//! Behaviour tests for favourites across storage modes.
//!
//! Device favourites live in a temporary directory opened through
//! [`CapStdKeyValueStore`], so a reload reads what an earlier session wrote.
//! Account favourites use the in-memory relation.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use petpals::domain::ports::{FavoriteRepository, KeyValueStore, PetRepository};
use petpals::domain::{FavoritesSynchronizer, Pet, PetFilter, PetId, Species, UserId, Viewer};
use petpals::outbound::file_store::CapStdKeyValueStore;
use petpals::outbound::memory::{InMemoryFavoriteRepository, InMemoryPetRepository};
use petpals::test_support::pet_draft;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use tokio::runtime::Runtime;

type Favorites = FavoritesSynchronizer<dyn FavoriteRepository, dyn KeyValueStore>;

struct FavoritesWorld {
    runtime: Runtime,
    device_dir: TempDir,
    server: Arc<dyn FavoriteRepository>,
    listing: Vec<Pet>,
    ids: HashMap<String, PetId>,
    viewer: RefCell<Viewer>,
    favorites: RefCell<Option<Arc<Favorites>>>,
}

impl FavoritesWorld {
    fn new() -> Self {
        let runtime = Runtime::new().expect("tokio runtime should initialise");
        let pets = InMemoryPetRepository::new();
        let listing = runtime.block_on(async {
            for (name, species) in [("Rex", Species::Dog), ("Tom", Species::Cat)] {
                pets.insert(&pet_draft(name, species, 2, true))
                    .await
                    .expect("seed pet");
            }
            pets.query(&PetFilter::any().to_query())
                .await
                .expect("list pets")
        });
        let ids = listing
            .iter()
            .map(|pet| (pet.name.clone(), pet.id))
            .collect();
        Self {
            runtime,
            device_dir: TempDir::new().expect("temporary device directory"),
            server: Arc::new(InMemoryFavoriteRepository::new()),
            listing,
            ids,
            viewer: RefCell::new(Viewer::anonymous()),
            favorites: RefCell::new(None),
        }
    }

    fn pet_id(&self, name: &str) -> PetId {
        *self
            .ids
            .get(name)
            .unwrap_or_else(|| panic!("no seeded pet named {name}"))
    }

    /// Open the device directory afresh and load the viewer's set.
    fn load(&self) {
        let device: Arc<dyn KeyValueStore> = Arc::new(
            CapStdKeyValueStore::open(self.device_dir.path()).expect("open device store"),
        );
        let server = Arc::clone(&self.server);
        let viewer = self.viewer.borrow().clone();
        let favorites = self
            .runtime
            .block_on(async move { FavoritesSynchronizer::load(server, device, &viewer).await })
            .expect("favourites load");
        *self.favorites.borrow_mut() = Some(Arc::new(favorites));
    }

    fn favorites(&self) -> Arc<Favorites> {
        self.favorites
            .borrow()
            .clone()
            .expect("favourites should be loaded")
    }

    fn switch_viewer(&self, viewer: Viewer) {
        *self.viewer.borrow_mut() = viewer.clone();
        let favorites = self.favorites();
        self.runtime
            .block_on(async move { favorites.identity_changed(&viewer).await })
            .expect("identity change");
    }

    fn contains(&self, name: &str) -> bool {
        let favorites = self.favorites();
        let id = self.pet_id(name);
        self.runtime
            .block_on(async move { favorites.is_favorite(&id).await })
    }
}

#[fixture]
fn world() -> FavoritesWorld {
    FavoritesWorld::new()
}

#[given("an anonymous viewer with device storage")]
fn an_anonymous_viewer_with_device_storage(world: &FavoritesWorld) {
    world.load();
}

#[when("the viewer favourites {name}")]
fn the_viewer_favourites(world: &FavoritesWorld, name: String) {
    let favorites = world.favorites();
    let id = world.pet_id(&name);
    world
        .runtime
        .block_on(async move { favorites.toggle(id).await })
        .expect("toggle favourite");
}

#[when("the favourites are reloaded from storage")]
fn the_favourites_are_reloaded(world: &FavoritesWorld) {
    world.load();
}

#[when("the viewer signs in")]
fn the_viewer_signs_in(world: &FavoritesWorld) {
    world.switch_viewer(Viewer::user(UserId::random()));
}

#[when("the viewer signs out")]
fn the_viewer_signs_out(world: &FavoritesWorld) {
    world.switch_viewer(Viewer::anonymous());
}

#[then("the favourites include {name}")]
fn the_favourites_include(world: &FavoritesWorld, name: String) {
    assert!(world.contains(&name), "{name} should be a favourite");
}

#[then("the favourites exclude {name}")]
fn the_favourites_exclude(world: &FavoritesWorld, name: String) {
    assert!(!world.contains(&name), "{name} should not be a favourite");
}

#[then("the favourite pets are {names}")]
fn the_favourite_pets_are(world: &FavoritesWorld, names: String) {
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    let favorites = world.favorites();
    let listing = world.listing.clone();
    let pets = world
        .runtime
        .block_on(async move { favorites.favorite_pets(&listing).await });
    let actual: Vec<&str> = pets.iter().map(|pet| pet.name.as_str()).collect();
    assert_eq!(actual, expected);
}

#[scenario(path = "tests/features/favorites.feature")]
fn favorites_scenarios(world: FavoritesWorld) {
    drop(world);
}
