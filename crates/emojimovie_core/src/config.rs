//! Application configuration.
//!
//! # Responsibility
//! - Describe server, storage, field-alias and logging settings.
//! - Load them from TOML with defaults, then apply `EMOJIMOVIE_*` overrides.
//!
//! # Invariants
//! - A validated config always has a non-empty alias list per logical field.
//! - Config is resolved once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const ENV_HOST: &str = "EMOJIMOVIE_HOST";
const ENV_PORT: &str = "EMOJIMOVIE_PORT";
const ENV_BACKEND: &str = "EMOJIMOVIE_BACKEND";
const ENV_SQLITE_PATH: &str = "EMOJIMOVIE_SQLITE_PATH";
const ENV_JSON_PATH: &str = "EMOJIMOVIE_JSON_PATH";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub fields: FieldAliases,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Which record source backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Json,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    pub sqlite_path: PathBuf,
    pub json_path: PathBuf,
    /// Insert the sample mappings when the SQLite table is empty.
    pub seed_on_empty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            sqlite_path: PathBuf::from("./emoji.db"),
            json_path: PathBuf::from("./emojis.json"),
            seed_on_empty: true,
        }
    }
}

/// Priority-ordered source keys for each logical record field.
///
/// The first key present with a string value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub emoji: Vec<String>,
    pub unicode_seq: Vec<String>,
    pub movie_name: Vec<String>,
    pub hint: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            emoji: owned(&["emoji"]),
            unicode_seq: owned(&["unicode_seq", "unicode", "codepoints"]),
            movie_name: owned(&["movie_name", "movie", "title"]),
            hint: owned(&["hint"]),
        }
    }
}

impl FieldAliases {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, aliases) in [
            ("emoji", &self.emoji),
            ("unicode_seq", &self.unicode_seq),
            ("movie_name", &self.movie_name),
            ("hint", &self.hint),
        ] {
            if aliases.iter().all(|alias| alias.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "fields.{field} needs at least one non-empty alias"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Falls back to `default_log_level()` when unset.
    pub level: Option<String>,
    /// Absolute directory for rolling log files; stderr when unset.
    pub dir: Option<String>,
}

impl AppConfig {
    /// Parses TOML text; missing sections and keys take defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` when given, otherwise defaults, then applies env overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from a key lookup, normally the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_PORT} must be a port number, got `{port}`"))
            })?;
        }
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.storage.backend = Backend::parse(&backend).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{ENV_BACKEND} must be sqlite|json, got `{backend}`"
                ))
            })?;
        }
        if let Some(path) = lookup(ENV_SQLITE_PATH) {
            self.storage.sqlite_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_JSON_PATH) {
            self.storage.json_path = PathBuf::from(path);
        }
        self.validate()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host cannot be empty".to_string()));
        }
        self.fields.validate()
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
