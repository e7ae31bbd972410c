use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::api::Credential;
use crate::theme::ThemeVariant;

const APP_SENTINEL: &str = "cine";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(rename = "_app")]
    pub app: String,

    pub api_key: Option<String>,

    pub base_url: Option<String>,

    pub theme: Option<ThemeVariant>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: APP_SENTINEL.to_string(),
            api_key: None,
            base_url: None,
            theme: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.app != APP_SENTINEL {
            bail!(
                "Settings file appears to belong to another application (expected _app = '{}', found '{}')",
                APP_SENTINEL,
                self.app
            );
        }
        Ok(())
    }
}

/// The command line (or `OMDB_API_KEY`) wins over the settings file. A
/// missing or blank key is fatal: nothing can be fetched without one.
pub fn resolve_credential(cli_key: Option<&str>, settings: &Settings) -> Result<Credential> {
    let key = cli_key
        .or(settings.api_key.as_deref())
        .map(str::trim)
        .filter(|k| !k.is_empty());

    match key {
        Some(k) => Ok(Credential::new(k)),
        None => bail!(
            "No OMDb API key configured. Pass --api-key, set OMDB_API_KEY, \
             or add api_key to settings.toml (get one at https://www.omdbapi.com/apikey.aspx)"
        ),
    }
}

pub fn config_dir(custom: Option<&PathBuf>) -> Option<PathBuf> {
    custom
        .cloned()
        .or_else(|| dirs::home_dir().map(|p| p.join(".config").join("cine")))
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.toml")
}

pub fn log_path(config_dir: &Path) -> PathBuf {
    config_dir.join("cine.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.app, "cine");
        assert!(settings.api_key.is_none());
        assert!(settings.theme.is_none());
    }

    #[test]
    fn load_valid_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(
            &path,
            "_app = \"cine\"\napi_key = \"abc123\"\ntheme = \"light\"\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.theme, Some(ThemeVariant::Light));
        assert!(settings.base_url.is_none());
    }

    #[test]
    fn wrong_sentinel_returns_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(&path, "_app = \"other-app\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err().to_string();
        assert!(err.contains("another application"));
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(&path, "_app = \"cine\"\ntheme = \"solarized\"\n").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn base_url_is_optional_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(
            &path,
            "_app = \"cine\"\nbase_url = \"http://localhost:8080\"\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.base_url.as_deref(), Some("http://localhost:8080"));
        assert!(settings.theme.is_none());
    }

    #[test]
    fn cli_key_beats_settings_key() {
        let settings = Settings {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };

        let key = resolve_credential(Some("from-cli"), &settings).unwrap();
        assert_eq!(key.expose(), "from-cli");

        let key = resolve_credential(None, &settings).unwrap();
        assert_eq!(key.expose(), "from-file");
    }

    #[test]
    fn missing_key_fails_fast() {
        let err = resolve_credential(None, &Settings::default())
            .unwrap_err()
            .to_string();
        assert!(err.contains("No OMDb API key"));

        assert!(resolve_credential(Some("   "), &Settings::default()).is_err());
    }

    #[test]
    fn config_dir_uses_custom_when_provided() {
        let custom = PathBuf::from("/custom/path");
        assert_eq!(config_dir(Some(&custom)), Some(custom));
    }

    #[test]
    fn log_lives_in_config_dir() {
        let dir = PathBuf::from("/tmp/cine");
        assert_eq!(log_path(&dir), PathBuf::from("/tmp/cine/cine.log"));
    }
}
