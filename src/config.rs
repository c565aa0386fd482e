//! Persisted application settings.
//!
//! Settings live in `config.toml` under the `.carbonflo` root. Every field has a
//! default, so a missing or partial file is valid. `CARBONFLO_BASE_URL` and
//! `CARBONFLO_API_KEY` override the file after it is read.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable replacing `server.base_url`.
pub const BASE_URL_ENV: &str = "CARBONFLO_BASE_URL";
/// Environment variable replacing `server.api_key`.
pub const API_KEY_ENV: &str = "CARBONFLO_API_KEY";

const DEFAULT_BASE_URL: &str = "http://carbonflo.ddns.net:8000";
const DEFAULT_CHART_POINT_LIMIT: usize = 40;

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    /// The configured server address is not an absolute http(s) URL.
    #[error("Invalid server base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Credential for the generative-AI service.
///
/// Carried through configuration only; the request flows never send it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Remote server location and credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// HTTP agent limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    /// Largest response body accepted from either endpoint.
    pub max_response_bytes: usize,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
            max_response_bytes: 1024 * 1024,
        }
    }
}

impl NetworkSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.max(1))
    }
}

/// Trend chart preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Number of leading countries plotted on the trend chart.
    pub point_limit: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            point_limit: DEFAULT_CHART_POINT_LIMIT,
        }
    }
}

/// Everything stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub network: NetworkSettings,
    pub chart: ChartSettings,
}

impl AppSettings {
    /// Trim the base URL, drop trailing slashes and reject non-http(s) values.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.server.base_url = normalize_base_url(&self.server.base_url)?;
        if self
            .server
            .api_key
            .as_ref()
            .is_some_and(|key| key.expose().trim().is_empty())
        {
            self.server.api_key = None;
        }
        Ok(self)
    }

    /// Apply `CARBONFLO_BASE_URL` / `CARBONFLO_API_KEY` when set and non-empty.
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        self = self.with_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );
        self.normalized()
    }

    fn with_overrides(mut self, base_url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
            self.server.base_url = base_url;
        }
        if let Some(api_key) = api_key.filter(|value| !value.trim().is_empty()) {
            self.server.api_key = Some(ApiKey::new(api_key.trim()));
        }
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason,
    };
    let parsed = url::Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.query().is_some() {
        return Err(invalid("query strings are not allowed".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from the default location with environment overrides,
/// returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    load_from(&path)?.apply_env_overrides()
}

/// Load settings from `path` without environment overrides.
pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return AppSettings::default().normalized();
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: AppSettings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    settings.normalized()
}

/// Write settings to `path`, creating parent directories.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.chart.point_limit, 40);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"https://example.org/api/\"\n").unwrap();
        let settings = load_from(&path).unwrap();
        assert_eq!(settings.server.base_url, "https://example.org/api");
        assert_eq!(settings.network, NetworkSettings::default());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"ftp://example.org\"\n").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn reports_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();
        assert!(matches!(
            load_from(&path).unwrap_err(),
            ConfigError::ParseToml { .. }
        ));
    }

    #[test]
    fn save_then_load_preserves_api_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut settings = AppSettings::default();
        settings.server.api_key = Some(ApiKey::new("secret-key"));
        save_to_path(&settings, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.server.api_key, Some(ApiKey::new("secret-key")));
    }

    #[test]
    fn overrides_ignore_blank_values() {
        let settings = AppSettings::default()
            .with_overrides(Some("  ".to_string()), Some("k".to_string()))
            .normalized()
            .unwrap();
        assert_eq!(settings.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.server.api_key, Some(ApiKey::new("k")));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert!(!format!("{key:?}").contains("super-secret"));
    }

    #[test]
    fn config_path_lives_under_app_root() {
        let base = tempdir().unwrap();
        let _guard = crate::app_dirs::OverrideGuard::set(base.path().to_path_buf());
        let path = config_path().unwrap();
        assert_eq!(
            path,
            base.path().join(crate::app_dirs::APP_DIR_NAME).join(CONFIG_FILE_NAME)
        );
    }
}
