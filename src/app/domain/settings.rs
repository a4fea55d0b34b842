use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FontChoice {
    ScreenBold,
    Courier,
    HelveticaMono,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font")]
    pub font: FontChoice,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_word_wrap")]
    pub word_wrap_enabled: bool,

    #[serde(default)]
    pub line_numbers_enabled: bool,

    /// Seconds between two marker re-scans of the text pane
    #[serde(default = "default_highlight_interval")]
    pub highlight_interval_secs: f64,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn default_font() -> FontChoice {
    FontChoice::Courier
}

fn default_font_size() -> u32 {
    12
}

fn default_word_wrap() -> bool {
    true
}

fn default_highlight_interval() -> f64 {
    5.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            font: default_font(),
            font_size: default_font_size(),
            word_wrap_enabled: default_word_wrap(),
            line_numbers_enabled: false,
            highlight_interval_secs: default_highlight_interval(),
        }
    }
}

impl AppSettings {
    /// Load settings from the user config directory, writing defaults if none exist.
    pub fn load() -> Self {
        let path = Self::get_config_path();
        match Self::load_from(&path) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let default = Self::default();
                if let Err(e) = default.save_to(&path) {
                    log::debug!("could not write default settings: {}", e);
                }
                default
            }
            Err(e) => {
                log::warn!("Failed to parse settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// `Ok(None)` when there is no settings file yet.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(Some(settings))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.highlight_interval_secs.is_nan() || self.highlight_interval_secs <= 0.0 {
            return Err(AppError::Settings(format!(
                "highlight_interval_secs must be positive, got {}",
                self.highlight_interval_secs
            )));
        }
        if self.font_size == 0 {
            return Err(AppError::Settings("font_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("xmlview");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.font_size, 12);
        assert_eq!(settings.font, FontChoice::Courier);
        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert!(settings.word_wrap_enabled);
        assert!(!settings.line_numbers_enabled);
        assert_eq!(settings.highlight_interval_secs, 5.0);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"font_size": 14}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.highlight_interval_secs, 5.0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            theme_mode: ThemeMode::Dark,
            highlight_interval_secs: 2.5,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), Some(settings));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(AppSettings::load_from(&dir.path().join("none.json")).unwrap(), None);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"highlight_interval_secs": 0}"#).unwrap();
        assert!(matches!(AppSettings::load_from(&path), Err(AppError::Settings(_))));
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(AppSettings::load_from(&path), Err(AppError::Json(_))));
    }
}
