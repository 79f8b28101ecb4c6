use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

use crate::models::error::Error;

/// Persisted set of enabled mods, keyed by archive base file name.
///
/// The file is a plain TOML list under the `enabledMods` key so users can
/// inspect and hand-edit it. Stored order is insertion order; overlay
/// rebuilds replay mods in exactly this order.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct EnabledMods {
    #[serde(rename = "enabledMods", default)]
    pub enabled_mods: Vec<String>,
}

impl EnabledMods {
    /// Loads the store. A missing or unparsable file yields the empty set,
    /// never an error.
    pub fn load(path: &Utf8Path) -> EnabledMods {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
                debug!("unparsable store {path}: {e}");
                EnabledMods::default()
            }),
            Err(e) => {
                debug!("no store at {path}: {e}");
                EnabledMods::default()
            }
        }
    }

    /// Writes the store through a temporary sibling file, then renames it
    /// over `path`, so a load never observes a half-written list.
    pub fn save(&self, path: &Utf8Path) -> Result<(), Error> {
        let text = toml::to_string(self).map_err(|e| Error::Parse(e.to_string()))?;

        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn contains(&self, base_name: &str) -> bool {
        self.enabled_mods.iter().any(|name| name == base_name)
    }

    pub fn add(&mut self, base_name: &str) {
        if !self.contains(base_name) {
            self.enabled_mods.push(base_name.to_string());
        }
    }

    pub fn remove(&mut self, base_name: &str) {
        self.enabled_mods.retain(|name| name != base_name);
    }
}
