use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::content::DatasetSource;

pub const MAX_ADVANCE_DELAY_MS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Directory holding `cards.json` and `questions.json`. Takes
    /// precedence over the bundled datasets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Base URL serving the datasets. Takes precedence over `data_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    /// Pause after recording an outcome before the next card.
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default)]
    pub start_reversed: bool,
    #[serde(default)]
    pub shuffle_on_load: bool,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_advance_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            data_dir: None,
            data_url: None,
            advance_delay_ms: default_advance_delay_ms(),
            start_reversed: false,
            shuffle_on_load: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("combicards")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Clamp and reset out-of-range values. Call after deserialization and
    /// after applying command line overrides.
    pub fn validate(&mut self, valid_themes: &[String], valid_locales: &[&str]) {
        if self.advance_delay_ms > MAX_ADVANCE_DELAY_MS {
            log::warn!(
                "advance_delay_ms {} too large, clamping to {MAX_ADVANCE_DELAY_MS}",
                self.advance_delay_ms
            );
            self.advance_delay_ms = MAX_ADVANCE_DELAY_MS;
        }
        if !valid_themes.iter().any(|t| *t == self.theme) {
            log::warn!("unknown theme {:?}, using {}", self.theme, default_theme());
            self.theme = default_theme();
        }
        if !valid_locales.contains(&self.locale.as_str()) {
            log::warn!("unknown locale {:?}, using {}", self.locale, default_locale());
            self.locale = default_locale();
        }
        for value in [&mut self.data_dir, &mut self.data_url] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }
    }

    pub fn dataset_source(&self) -> DatasetSource {
        if let Some(url) = &self.data_url {
            DatasetSource::Remote(url.clone())
        } else if let Some(dir) = &self.data_dir {
            DatasetSource::Directory(PathBuf::from(dir))
        } else {
            DatasetSource::Bundled
        }
    }
}
