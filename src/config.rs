use crate::models::paths::AppPaths;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "mod_overlay";

/// Application settings: where mod archives live and where the overlay is
/// materialized. All paths default relative to the working directory.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub version: u8,
    pub mods_folder: Utf8PathBuf,
    pub natives_folder: Utf8PathBuf,
    pub staging_folder: Utf8PathBuf,
    /// When set, catalog building stages only each mod's preview image
    /// instead of the full payload.
    pub preview_only_staging: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: 0,
            mods_folder: "mods".into(),
            natives_folder: "natives".into(),
            staging_folder: "tmp".into(),
            preview_only_staging: false,
        }
    }
}

impl AppSettings {
    pub fn load() -> Result<AppSettings, confy::ConfyError> {
        confy::load(APP_NAME, None)
    }

    /// Like `load`, but a missing or unreadable settings file falls back
    /// to the defaults.
    pub fn load_or_default() -> AppSettings {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, None, self)
    }

    pub fn paths(&self) -> AppPaths {
        AppPaths {
            mods: self.mods_folder.clone(),
            natives: self.natives_folder.clone(),
            staging: self.staging_folder.clone(),
            ..AppPaths::default()
        }
    }
}
