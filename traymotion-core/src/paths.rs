//! Well-known file locations

use std::path::{Path, PathBuf};

const APP_DIR: &str = "traymotion";
const SETTINGS_FILE: &str = "settings.json";
const ASSET_FILE: &str = "tray-icon.processed";

/// Locations of the settings document and the stored icon asset
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding both files
    pub data_dir: PathBuf,
    /// Settings document
    pub settings: PathBuf,
    /// The single processed icon asset; its name carries no format
    pub asset: PathBuf,
}

impl AppPaths {
    /// Uses the given directory for all files
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            settings: data_dir.join(SETTINGS_FILE),
            asset: data_dir.join(ASSET_FILE),
            data_dir,
        }
    }

    /// Per-user data directory, or `./traymotion` when none is available
    pub fn default_location() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(base.join(APP_DIR))
    }

    /// Whether an asset has been stored yet
    pub fn has_asset(&self) -> bool {
        self.asset.is_file()
    }
}
