//! PetPals entry point: loads settings, installs logging and serves the API.

mod server;

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroize;

use petpals::inbound::http::health::HealthState;
use petpals::outbound::file_store::CapStdKeyValueStore;
use petpals::outbound::persistence::{DbPool, PoolConfig};
use petpals::settings::AppSettings;

use server::{ServerConfig, create_server};

const SESSION_KEY_MIN_LEN: usize = 64;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let key = load_session_key(&settings)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr);
    if let Some(url) = settings.database_url() {
        let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }
    if let Some(dir) = &settings.device_store_dir {
        let store = CapStdKeyValueStore::open(dir)?;
        config = config.with_device_store(Arc::new(store));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "petpals listening");
    server.await
}

fn read_key_file(path: &Path) -> io::Result<Vec<u8>> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "session key path has no file name")
    })?;
    Dir::open_ambient_dir(parent, ambient_authority())?.read(file_name)
}

/// Derive the cookie key from the key file.
///
/// An unreadable file is fatal unless ephemeral keys are allowed or this is a
/// debug build, in which case a random key is generated. Key material shorter
/// than [`SESSION_KEY_MIN_LEN`] bytes is always rejected.
fn load_session_key(settings: &AppSettings) -> io::Result<Key> {
    let key_path = settings.session_key_file();
    match read_key_file(&key_path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "session key at {} is {length} bytes; at least {SESSION_KEY_MIN_LEN} required",
                        key_path.display()
                    ),
                ));
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(e) if cfg!(debug_assertions) || settings.session_allow_ephemeral => {
            warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(io::Error::other(format!(
            "failed to read session key at {}: {e}",
            key_path.display()
        ))),
    }
}
