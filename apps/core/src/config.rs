use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::web_search::GOOGLE_SEARCH_ENDPOINT;

const APP_DIR_NAME: &str = "querycraft";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to encode config: {0}")]
    Encode(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    #[default]
    Plain,
    Html,
    Ansi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search_endpoint: String,
    pub browser_command: Option<String>,
    pub log_level: String,
    pub highlight_style: HighlightStyle,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_endpoint: GOOGLE_SEARCH_ENDPOINT.to_string(),
            browser_command: None,
            log_level: "info".to_string(),
            highlight_style: HighlightStyle::Plain,
            config_path: default_config_path(),
        }
    }
}

impl Config {
    /// The validated search endpoint.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        parse_endpoint(&self.search_endpoint)
    }
}

/// Per-user data directory, falling back to the temp dir when the platform has none.
pub fn stable_app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join(CONFIG_FILE_NAME)
}

/// Loads the config at `path` (or the default location). A missing file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let mut cfg = if path.exists() {
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        parse(&path, &raw)?
    } else {
        Config::default()
    };
    cfg.config_path = path;
    validate(&cfg)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    let path = &cfg.config_path;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let encoded = if is_toml(path) {
        toml::to_string_pretty(cfg).map_err(|e| ConfigError::Encode(e.to_string()))?
    } else {
        serde_json::to_string_pretty(cfg).map_err(|e| ConfigError::Encode(e.to_string()))?
    };
    std::fs::write(path, encoded).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    parse_endpoint(&cfg.search_endpoint)?;

    if cfg.log_level.trim().is_empty() {
        return Err(ConfigError::Invalid("log_level is required".into()));
    }

    if cfg
        .browser_command
        .as_deref()
        .is_some_and(|command| command.trim().is_empty())
    {
        return Err(ConfigError::Invalid(
            "browser_command must not be blank".into(),
        ));
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("config_path is required".into()));
    }

    Ok(())
}

fn parse(path: &Path, raw: &str) -> Result<Config, ConfigError> {
    let parsed = if is_toml(path) {
        toml::from_str::<Config>(raw).map_err(|e| e.to_string())
    } else {
        json5::from_str::<Config>(raw).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::Invalid(format!("search_endpoint '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!(
            "search_endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::{parse, Config, HighlightStyle};
    use std::path::Path;

    #[test]
    fn json5_accepts_comments_and_partial_fields() {
        let raw = r#"{
            // only override the style
            highlight_style: "ansi",
        }"#;
        let cfg = parse(Path::new("config.json"), raw).unwrap();
        assert_eq!(cfg.highlight_style, HighlightStyle::Ansi);
        assert_eq!(cfg.search_endpoint, Config::default().search_endpoint);
    }

    #[test]
    fn toml_extension_selects_toml_parser() {
        let raw = "log_level = \"debug\"\nbrowser_command = \"firefox\"\n";
        let cfg = parse(Path::new("querycraft.TOML"), raw).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.browser_command.as_deref(), Some("firefox"));
    }
}
