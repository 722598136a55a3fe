// Configuration loading and parsing (config/tycoon.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name inside `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "tycoon.toml";

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "PORT";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub simulation: SimulationConfig,
    pub leaderboard: LeaderboardConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every non-API path.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            static_dir: "public".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite path; `":memory:"` for an ephemeral store.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: "tycoon.db".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Master seed for the service's generator. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        LeaderboardConfig {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl LeaderboardConfig {
    /// Resolve a requested page size: default when absent, capped at
    /// `max_limit`, never zero.
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate a config from TOML text.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load `config/tycoon.toml` relative to `base_dir`. A missing file yields
/// the built-in defaults. Does not copy defaults or read the environment.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    if !path.exists() {
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    }
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Copy `defaults/tycoon.toml` into `config/` if it is not already there.
/// Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if !source.is_file() || target.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            let content = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
                message: format!("failed to read {}: {e}", source.display()),
            })?;
            std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        // Raced with another writer; theirs wins.
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Apply environment overrides. Currently only `PORT`.
pub fn apply_env_overrides(
    config: &mut Config,
    port: Option<String>,
) -> Result<(), ConfigError> {
    if let Some(raw) = port {
        let port = raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::ValidationError {
                field: PORT_ENV.into(),
                message: format!("not a valid port: {raw:?}"),
            })?;
        config.server.port = port;
        validate(config)?;
    }
    Ok(())
}

/// Convenience wrapper: copies defaults if needed, loads config relative to
/// the current working directory, then applies environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    apply_env_overrides(&mut config, std::env::var(PORT_ENV).ok())?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.database.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    let lb = &config.leaderboard;
    if lb.max_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "leaderboard.max_limit".into(),
            message: "must be > 0".into(),
        });
    }
    if lb.default_limit == 0 || lb.default_limit > lb.max_limit {
        return Err(ConfigError::ValidationError {
            field: "leaderboard.default_limit".into(),
            message: format!(
                "must be between 1 and max_limit ({}), got {}",
                lb.max_limit, lb.default_limit
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
