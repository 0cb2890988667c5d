use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use arena_livekit::ApiCredentials;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Name of the single broadcast room
pub const DEFAULT_ROOM_NAME: &str = "arena-of-consciousness";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub livekit: LiveKitConfig,
    pub room: RoomConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 3000,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

/// Hosted media service connection
///
/// All three values are optional at load time. Handlers that need them report
/// their absence per request instead of refusing to start.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveKitConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            api_secret: None,
            request_timeout_seconds: 30,
        }
    }
}

impl std::fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl LiveKitConfig {
    /// Service URL, if configured
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_ref())
    }

    /// Signing credentials, if both key and secret are configured
    #[must_use]
    pub fn credentials(&self) -> Option<ApiCredentials> {
        let key = non_empty(self.api_key.as_ref())?;
        let secret = non_empty(self.api_secret.as_ref())?;
        Some(ApiCredentials::new(key, secret))
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub name: String,
    pub token_ttl_seconds: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ROOM_NAME.to_string(),
            token_ttl_seconds: 3600,
        }
    }
}

impl RoomConfig {
    #[must_use]
    pub const fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }
}

/// Unprefixed variables kept for deployments configured the old way
const LEGACY_LIVEKIT_VARS: [(&str, &str); 3] = [
    ("LIVEKIT_URL", "livekit.url"),
    ("LIVEKIT_API_KEY", "livekit.api_key"),
    ("LIVEKIT_API_SECRET", "livekit.api_secret"),
];

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. `LIVEKIT_URL` / `LIVEKIT_API_KEY` / `LIVEKIT_API_SECRET` (highest priority)
    /// 2. `ARENA_`-prefixed environment variables (`ARENA_SERVER__HTTP_PORT`, etc.)
    /// 3. Config file (if provided)
    /// 4. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(config_file, &env)
    }

    /// Same as [`Config::load`] but reading variables from `env` instead of the process
    pub fn load_with_env(
        config_file: Option<&str>,
        env: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ARENA")
                .prefix_separator("_")
                .separator("__")
                .source(Some(
                    env.iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                )),
        );

        for (var, key) in LEGACY_LIVEKIT_VARS {
            builder = builder.set_override_option(key, env.get(var).cloned())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Check values that would make the server unusable
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.http_port == 0 {
            errors.push("server.http_port must be non-zero".to_string());
        }
        if self.room.name.trim().is_empty() {
            errors.push("room.name must not be empty".to_string());
        }
        if self.server.request_timeout_seconds == 0 {
            errors.push("server.request_timeout_seconds must be non-zero".to_string());
        }
        if self.livekit.request_timeout_seconds == 0 {
            errors.push("livekit.request_timeout_seconds must be non-zero".to_string());
        }
        if self.room.token_ttl_seconds == 0 {
            errors.push("room.token_ttl_seconds must be non-zero".to_string());
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            errors.push(format!("logging.level '{}' is not a log level", self.logging.level));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Get HTTP address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.http_port)
    }
}

/// Resolve the config file: explicit path > `ARENA_CONFIG_PATH` > `./config.yaml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var("ARENA_CONFIG_PATH").ok())
        .filter(|p| Path::new(p).exists())
        .or_else(|| {
            let cwd = "config.yaml";
            Path::new(cwd).exists().then(|| cwd.to_string())
        })
}
