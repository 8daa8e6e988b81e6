use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

const DEFAULT_ORIGIN_PREFIX: &str = "http://localhost";
const DEFAULT_HEARTBEAT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Runtime settings, read from Shuttle secrets (`Secrets.toml`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub allowed_origin_prefix: String,
    pub heartbeat: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Postgres,
            allowed_origin_prefix: DEFAULT_ORIGIN_PREFIX.into(),
            heartbeat: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
        }
    }
}

impl AppConfig {
    /// Builds the config from any key lookup. Missing or unparsable values
    /// fall back to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store = match lookup("STORE_BACKEND") {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!("{} - using {:?}", e, defaults.store);
                defaults.store
            }),
            None => defaults.store,
        };

        let allowed_origin_prefix = lookup("ALLOWED_ORIGIN_PREFIX")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.allowed_origin_prefix);

        let heartbeat = match lookup("STREAM_HEARTBEAT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("Invalid STREAM_HEARTBEAT_SECS '{}' - using {:?}", value, defaults.heartbeat);
                    defaults.heartbeat
                }
            },
            None => defaults.heartbeat,
        };

        Self { store, allowed_origin_prefix, heartbeat }
    }

    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }
}
