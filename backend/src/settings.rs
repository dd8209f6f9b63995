//! Application settings loaded via OrthoConfig.
//!
//! Values layer defaults, a configuration file, `PETPALS_*` environment
//! variables and CLI flags, later layers winning.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime configuration for the `petpals` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PETPALS")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. In-memory adapters are used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Directory holding anonymous favourites, one file per browser device.
    /// In-memory storage when unset.
    pub device_store_dir: Option<PathBuf>,
}

/// A settings value that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bind address {value:?}: {message}")]
pub struct InvalidBindAddr {
    pub value: String,
    pub message: String,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidBindAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|err: std::net::AddrParseError| InvalidBindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// The database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "PETPALS_BIND_ADDR",
        "PETPALS_DATABASE_URL",
        "PETPALS_DB_MAX_CONNECTIONS",
        "PETPALS_SESSION_KEY_FILE",
        "PETPALS_SESSION_ALLOW_EPHEMERAL",
        "PETPALS_COOKIE_SECURE",
        "PETPALS_DEVICE_STORE_DIR",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("petpals")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from("/var/run/secrets/session_key")
        );
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure);
        assert!(settings.device_store_dir.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PETPALS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "PETPALS_DATABASE_URL",
                Some("postgres://localhost/petpals".to_owned()),
            ),
            ("PETPALS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("PETPALS_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("PETPALS_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("PETPALS_COOKIE_SECURE", Some("false".to_owned())),
            ("PETPALS_DEVICE_STORE_DIR", Some("/tmp/device".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("parses"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/petpals"));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure);
        assert_eq!(settings.device_store_dir, Some(PathBuf::from("/tmp/device")));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let mut settings = load_from_empty_args();
        settings.bind_addr = Some("not-an-address".to_owned());
        let err = settings.bind_addr().expect_err("invalid");
        assert_eq!(err.value, "not-an-address");
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let mut settings = load_from_empty_args();
        settings.database_url = Some("   ".to_owned());
        assert_eq!(settings.database_url(), None);
    }
}
