use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::Coordinate;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_LANG: &str = "fi";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Location-related settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Remembered answer to the foreground location prompt.
    pub permission: Option<bool>,

    /// Override for the IP geolocation endpoint.
    pub ip_endpoint: Option<String>,

    /// Fixed position used instead of IP geolocation, e.g.
    /// [location.manual]
    /// latitude = 60.17
    /// longitude = 24.94
    pub manual: Option<Coordinate>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub lang: String,
    pub request_timeout_secs: u64,
    pub location: LocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            lang: DEFAULT_LANG.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Config from the platform config file; defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Persist to the platform config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file: {}", path.display()));
            }
        };

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geoweather", "geoweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the stored one.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env: Option<String>) -> Option<String> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn remember_permission(&mut self, granted: bool) {
        self.location.permission = Some(granted);
    }

    pub fn forget_permission(&mut self) {
        self.location.permission = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_finnish_and_ten_second_timeout() {
        let cfg = Config::default();
        assert_eq!(cfg.lang, "fi");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert!(cfg.location.permission.is_none());
    }

    #[test]
    fn environment_key_wins_over_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.api_key_with_env(Some("ENV_KEY".into())).as_deref(), Some("ENV_KEY"));
        assert_eq!(cfg.api_key_with_env(None).as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let mut cfg = Config::default();
        assert!(cfg.api_key_with_env(Some("   ".into())).is_none());

        cfg.set_api_key(String::new());
        assert!(cfg.api_key_with_env(None).is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc"

            [location.manual]
            latitude = 60.17
            longitude = 24.94
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.lang, "fi");
        assert_eq!(cfg.location.manual, Some(Coordinate::new(60.17, 24.94)));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn saved_file_loads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("abc".into());
        cfg.lang = "en".into();
        cfg.remember_permission(true);
        cfg.location.manual = Some(Coordinate::new(60.17, 24.94));
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn unparsable_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "lang = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn permission_can_be_remembered_and_forgotten() {
        let mut cfg = Config::default();
        cfg.remember_permission(false);
        assert_eq!(cfg.location.permission, Some(false));

        cfg.forget_permission();
        assert!(cfg.location.permission.is_none());
    }
}
