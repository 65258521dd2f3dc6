//! CLI settings file.
//!
//! Settings are read from `settings.toml` in the platform config folder:
//! - macOS: ~/Library/Application Support/org.snac.snac-align/
//! - Windows: %APPDATA%/snac/snac-align/config/
//! - Linux: ~/.config/snac-align/
//!
//! Command-line flags and `SNAC_HOST_URL` / `SNAC_PROJECT` take precedence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use snac_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use snac_map::DEFAULT_MIN_CONFIDENCE;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "snac";
const APP_NAME: &str = "snac-align";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: HostSettings,
    pub suggest: SuggestSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    pub url: String,
    pub project: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            project: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    pub min_confidence: f32,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Host values given on the command line or in the environment.
#[derive(Debug, Clone, Default)]
pub struct HostOverrides {
    pub url: Option<String>,
    pub project: Option<String>,
}

impl Settings {
    /// Client configuration with `overrides` applied on top of the file.
    pub fn client_config(&self, overrides: &HostOverrides) -> Result<ClientConfig> {
        let url = overrides.url.as_deref().unwrap_or(&self.host.url);
        let mut config = ClientConfig::new(url)
            .with_context(|| format!("invalid host URL {url:?}"))?
            .with_timeout(Duration::from_secs(self.host.timeout_secs));
        if let Some(project) = overrides.project.as_ref().or(self.host.project.as_ref()) {
            config = config.with_project(project.clone());
        }
        Ok(config)
    }
}

/// Path of the default settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads settings from `path`, or from the default location.
///
/// An explicit path must exist and parse. A missing or unreadable default
/// file falls back to defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = path {
        return read_settings(path);
    }

    let Some(path) = settings_path() else {
        tracing::warn!("could not determine settings path, using defaults");
        return Ok(Settings::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    match read_settings(&path) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring settings file, using defaults");
            Ok(Settings::default())
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings = toml::from_str(&content)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [host]
            project = "1877"
            "#,
        )
        .unwrap();
        assert_eq!(settings.host.url, DEFAULT_BASE_URL);
        assert_eq!(settings.host.project.as_deref(), Some("1877"));
        assert_eq!(settings.suggest.min_confidence, DEFAULT_MIN_CONFIDENCE);
    }

    #[test]
    fn overrides_win_over_file() {
        let settings = Settings {
            host: HostSettings {
                url: "http://files:3333".to_string(),
                project: Some("1".to_string()),
                timeout_secs: 5,
            },
            ..Settings::default()
        };
        let config = settings
            .client_config(&HostOverrides {
                url: Some("http://flags:4444".to_string()),
                project: None,
            })
            .unwrap();
        assert_eq!(config.base_url().as_str(), "http://flags:4444/");
        assert_eq!(config.project_id(), Some("1"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn round_trips_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
