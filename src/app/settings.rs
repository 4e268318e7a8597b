use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::AppError;
use super::store::{EditorOptions, EditorTheme};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_codemap")]
    pub codemap_enabled: bool,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    #[serde(default)]
    pub scroll_beyond_last_line: bool,
}

pub const MIN_FONT_SIZE: u32 = 6;
pub const MAX_FONT_SIZE: u32 = 72;

fn default_codemap() -> bool {
    true
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Dark
}

fn default_font_size() -> u32 {
    14
}

fn default_line_numbers() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            codemap_enabled: default_codemap(),
            theme_mode: default_theme_mode(),
            font_size: default_font_size(),
            line_numbers_enabled: default_line_numbers(),
            scroll_beyond_last_line: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the user config dir, or create defaults if missing
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(settings) => settings.sanitized(),
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Replace values the editor cannot use with their defaults.
    fn sanitized(mut self) -> Self {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            tracing::warn!(
                "font size {} outside {}..={}, using {}",
                self.font_size,
                MIN_FONT_SIZE,
                MAX_FONT_SIZE,
                default_font_size()
            );
            self.font_size = default_font_size();
        }
        self
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(AppError::Settings(format!(
                "font size must be between {} and {}",
                MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("codepad");
        path.push("settings.json");
        path
    }

    /// Widget construction options derived from these settings.
    pub fn editor_options(&self, is_dark: bool) -> EditorOptions {
        EditorOptions {
            theme: if is_dark { EditorTheme::Dark } else { EditorTheme::Light },
            minimap_enabled: self.codemap_enabled,
            font_size: self.font_size,
            line_numbers: self.line_numbers_enabled,
            scroll_beyond_last_line: self.scroll_beyond_last_line,
            value: String::new(),
        }
    }
}

/// Whether development affordances are on. Read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Debug,
    Release,
}

impl RunMode {
    pub const ENV_VAR: &'static str = "CODEPAD_DEBUG";

    pub fn from_env() -> Self {
        let flag = std::env::var(Self::ENV_VAR).ok();
        Self::resolve(flag.as_deref(), cfg!(debug_assertions))
    }

    pub fn resolve(flag: Option<&str>, debug_build: bool) -> Self {
        match flag.map(str::trim) {
            Some("1") | Some("true") => RunMode::Debug,
            Some("0") | Some("false") => RunMode::Release,
            _ if debug_build => RunMode::Debug,
            _ => RunMode::Release,
        }
    }

    pub fn is_debug(self) -> bool {
        self == RunMode::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert!(settings.codemap_enabled);
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.font_size, 14);
        assert!(settings.line_numbers_enabled);
        assert!(!settings.scroll_beyond_last_line);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"codemap_enabled": false}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.codemap_enabled);
        assert_eq!(settings.font_size, 14);
    }

    #[test]
    fn test_theme_mode_serialization() {
        let settings = AppSettings {
            theme_mode: ThemeMode::SystemDefault,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"SystemDefault\""));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            codemap_enabled: false,
            font_size: 18,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_zero_font_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings { font_size: 0, ..Default::default() };
        let err = settings.save_to(&dir.path().join("s.json")).unwrap_err();
        assert!(matches!(err, AppError::Settings(_)));
    }

    #[test]
    fn test_unusable_font_size_falls_back_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        for bad in ["0", "4294967295"] {
            let json = format!(r#"{{"codemap_enabled": false, "font_size": {}}}"#, bad);
            fs::write(&path, json).unwrap();
            let settings = AppSettings::load_from(&path);
            assert_eq!(settings.font_size, 14);
            assert!(!settings.codemap_enabled);
            // and the codemap choice can still be written back
            settings.save_to(&path).unwrap();
        }
    }

    #[test]
    fn test_editor_options() {
        let settings = AppSettings { codemap_enabled: false, ..Default::default() };
        let options = settings.editor_options(false);
        assert_eq!(options.theme, EditorTheme::Light);
        assert!(!options.minimap_enabled);
        assert!(options.value.is_empty());
    }

    #[test]
    fn test_run_mode_resolution() {
        assert_eq!(RunMode::resolve(Some("true"), false), RunMode::Debug);
        assert_eq!(RunMode::resolve(Some("1"), false), RunMode::Debug);
        assert_eq!(RunMode::resolve(Some("false"), true), RunMode::Release);
        assert_eq!(RunMode::resolve(None, true), RunMode::Debug);
        assert_eq!(RunMode::resolve(None, false), RunMode::Release);
        assert_eq!(RunMode::resolve(Some("maybe"), false), RunMode::Release);
    }
}
