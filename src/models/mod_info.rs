use serde::{Deserialize, Serialize};

/// Fields of a mod archive's `modinfo.ini` descriptor.
///
/// Every field defaults to the empty string; descriptors routinely omit
/// keys and that is not an error. `name_as_bundle` is the bundle grouping
/// key, `screenshot` the preview image path relative to the mod root.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModInfo {
    pub name: String,
    pub name_as_bundle: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub screenshot: String,
}
