//! Load settings from the process environment.

use crate::config::types::*;
use crate::error::SettingsError;
use std::path::PathBuf;

impl Settings {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `STATIC_DIR` and `DB_MAX_CONNECTIONS`, falling back to defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| SettingsError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;
        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.into()));
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(SettingsError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            },
        };
        Ok(Settings {
            database_url,
            bind_addr,
            static_dir,
            max_connections,
        })
    }
}
