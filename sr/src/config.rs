//! Relay configuration types and loading
//!
//! YAML config with a fallback chain, then environment overrides: the
//! reference deployment was configured purely from the environment, so
//! every recognized variable still wins over the file.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main relay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,

    /// Persisted collection location
    pub storage: StorageConfig,

    /// Mail gateway for notifications
    pub mail: MailConfig,

    /// Login gate
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration with fallback chain, then apply environment
    /// overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env();
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config
        let local_config = PathBuf::from("solicitud-relay.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/solicitud-relay/config.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("solicitud-relay").join("config.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Environment overrides, applied after any config file
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(path) = std::env::var("SOLICITUDES_FILE") {
            self.storage.data_file = PathBuf::from(path);
        }

        env_override(&mut self.mail.url, "MAIL_URL");
        env_override(&mut self.mail.user, "MAIL_USER");
        env_override(&mut self.mail.password, "MAIL_PASSWORD");
        env_override(&mut self.mail.from, "MAIL_FROM");
        env_override(&mut self.mail.admin_to, "MAIL_ADMIN_TO");
        if let Ok(flag) = std::env::var("MAIL_ALLOW_INVALID_CERTS") {
            self.mail.allow_invalid_certs = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        env_override(&mut self.auth.clave_hash, "CLAVE_HASH");
        if let Ok(salt) = std::env::var("CLAVE_SALT") {
            self.auth.salt = salt;
        }
    }
}

fn env_override(field: &mut Option<String>, var: &str) {
    if let Ok(value) = std::env::var(var)
        && !value.is_empty()
    {
        *field = Some(value);
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,

    /// Bind address
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bind: "0.0.0.0".to_string(),
        }
    }
}

/// Persisted collection location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON document holding all solicitudes
    #[serde(rename = "data-file")]
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_file = dirs::data_dir()
            .map(|d| d.join("solicitud-relay").join("solicitudes.json"))
            .unwrap_or_else(|| PathBuf::from("solicitudes.json"));
        Self { data_file }
    }
}

/// Mail gateway configuration
///
/// `url` and `from` are both required to enable notification; anything
/// less runs the relay with mail disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Gateway endpoint accepting JSON message posts
    pub url: Option<String>,

    /// Basic auth user
    pub user: Option<String>,

    /// Basic auth password
    pub password: Option<String>,

    /// From address on outgoing mail
    pub from: Option<String>,

    /// Operations address receiving the admin alert
    #[serde(rename = "admin-to")]
    pub admin_to: Option<String>,

    /// Skip TLS certificate verification on the gateway connection
    #[serde(rename = "allow-invalid-certs")]
    pub allow_invalid_certs: bool,

    /// Outbound request timeout in milliseconds
    #[serde(rename = "timeout-ms", default = "default_mail_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_mail_timeout_ms() -> u64 {
    10_000
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            password: None,
            from: None,
            admin_to: None,
            allow_invalid_certs: false,
            timeout_ms: default_mail_timeout_ms(),
        }
    }
}

/// Login gate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Hex SHA-256 of salt+clave; unset disables login entirely
    #[serde(rename = "clave-hash")]
    pub clave_hash: Option<String>,

    /// Salt prepended to the clave before hashing
    pub salt: String,
}
