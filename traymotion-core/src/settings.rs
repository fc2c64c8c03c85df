//! Persisted user settings
//!
//! The document is tiny and always recoverable: anything missing or malformed
//! falls back to defaults instead of producing an error.

use crate::profile::ProfileKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SIZE: u32 = 32;
pub const MIN_SIZE: u32 = 16;
pub const MAX_SIZE: u32 = 128;

/// Icon size and performance mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Display size of the square icon, in pixels
    pub size: u32,
    /// Selected performance profile
    pub performance_mode: ProfileKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            performance_mode: ProfileKind::Balanced,
        }
    }
}

/// Loosely-typed view of the file so a single bad field cannot void the rest
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    size: Option<serde_json::Value>,
    performance_mode: Option<serde_json::Value>,
}

impl Settings {
    /// Creates settings with the size clamped into the supported range
    pub fn new(size: u32, performance_mode: ProfileKind) -> Self {
        Self {
            size: clamp_size(size),
            performance_mode,
        }
    }

    /// Parses a settings document, substituting defaults for anything unusable
    pub fn from_json(text: &str) -> Self {
        let raw: RawSettings = serde_json::from_str(text).unwrap_or_default();

        let size = raw
            .size
            .as_ref()
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite() && *v >= 1.0)
            .map(|v| clamp_size(v.round().min(u32::MAX as f64) as u32))
            .unwrap_or(DEFAULT_SIZE);

        let performance_mode = raw
            .performance_mode
            .as_ref()
            .and_then(|v| v.as_str())
            .map(ProfileKind::parse_or_default)
            .unwrap_or_default();

        Self {
            size,
            performance_mode,
        }
    }

    /// Loads settings from disk; never fails
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Unreadable settings, using defaults");
                }
                Self::default()
            }
        }
    }

    /// Writes the settings document, creating the parent directory
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), size = self.size, mode = %self.performance_mode, "Settings saved");
        Ok(())
    }
}

/// Clamps a display size into 16..=128
pub fn clamp_size(size: u32) -> u32 {
    size.clamp(MIN_SIZE, MAX_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let settings = Settings::from_json(r#"{"size":48,"performanceMode":"light"}"#);
        assert_eq!(settings, Settings::new(48, ProfileKind::Light));
    }

    #[test]
    fn test_defaults_on_garbage() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(Settings::from_json("{}"), Settings::default());
        assert_eq!(Settings::from_json("null"), Settings::default());
    }

    #[test]
    fn test_bad_fields_fall_back_independently() {
        let settings = Settings::from_json(r#"{"size":"big","performanceMode":"performance"}"#);
        assert_eq!(settings.size, DEFAULT_SIZE);
        assert_eq!(settings.performance_mode, ProfileKind::Performance);

        let settings = Settings::from_json(r#"{"size":64,"performanceMode":"ultra"}"#);
        assert_eq!(settings.size, 64);
        assert_eq!(settings.performance_mode, ProfileKind::Balanced);
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(Settings::from_json(r#"{"size":0}"#).size, DEFAULT_SIZE);
        assert_eq!(Settings::from_json(r#"{"size":4}"#).size, MIN_SIZE);
        assert_eq!(Settings::from_json(r#"{"size":4096}"#).size, MAX_SIZE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        assert_eq!(Settings::load(&path), Settings::default());

        let settings = Settings::new(24, ProfileKind::Performance);
        settings.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"performanceMode\":\"performance\""));
        assert_eq!(Settings::load(&path), settings);
    }
}
