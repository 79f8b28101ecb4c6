use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Presentation-facing mod record, sent to the frontend as-is.
///
/// A bundle carries one entry per member in `children` (sorted by name) and
/// has no archive of its own, so its `file_path` is `None`. A plain mod is a
/// leaf with empty `children`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Mod {
    pub id: String,
    pub name: String,
    pub bundle_name: String,
    pub is_bundle: bool,
    pub children: Vec<Mod>,
    pub file_path: Option<Utf8PathBuf>,
    pub description: String,
    pub author: String,
    pub version: String,
    pub preview_path: String,
    pub enabled: bool,
}

/// A single archive-backed mod as read from its descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct ModEntry {
    pub file_path: Utf8PathBuf,
    pub name: String,
    pub bundle_name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub preview_path: String,
    pub enabled: bool,
}

impl ModEntry {
    /// Stable identity: the archive file name without its directory.
    /// Moving the mods folder does not invalidate persisted state.
    pub fn base_name(&self) -> &str {
        self.file_path
            .file_name()
            .unwrap_or_else(|| self.file_path.as_str())
    }

    fn to_dto(&self) -> Mod {
        Mod {
            id: self.file_path.to_string(),
            name: self.name.clone(),
            bundle_name: self.bundle_name.clone(),
            is_bundle: false,
            children: Vec::new(),
            file_path: Some(self.file_path.clone()),
            description: self.description.clone(),
            author: self.author.clone(),
            version: self.version.clone(),
            preview_path: self.preview_path.clone(),
            enabled: self.enabled,
        }
    }
}

/// Composite node grouping archives that share a bundle name.
#[derive(Clone, Debug, PartialEq)]
pub struct ModBundle {
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub preview_path: String,
    pub children: Vec<ModEntry>,
}

/// Catalog node. The leaf/bundle distinction is a variant, not a flag, so
/// matches stay exhaustive; the tree never nests deeper than bundle → leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum ModNode {
    Leaf(ModEntry),
    Bundle(ModBundle),
}

impl ModNode {
    pub fn name(&self) -> &str {
        match self {
            ModNode::Leaf(entry) => &entry.name,
            ModNode::Bundle(bundle) => &bundle.name,
        }
    }

    /// Number of archive-backed mods below this node (1 for a leaf).
    pub fn leaf_count(&self) -> usize {
        match self {
            ModNode::Leaf(_) => 1,
            ModNode::Bundle(bundle) => bundle.children.len(),
        }
    }

    pub fn to_dto(&self) -> Mod {
        match self {
            ModNode::Leaf(entry) => entry.to_dto(),
            ModNode::Bundle(bundle) => Mod {
                id: bundle.name.clone(),
                name: bundle.name.clone(),
                bundle_name: bundle.name.clone(),
                is_bundle: true,
                children: bundle.children.iter().map(ModEntry::to_dto).collect(),
                file_path: None,
                description: bundle.description.clone(),
                author: bundle.author.clone(),
                version: bundle.version.clone(),
                preview_path: bundle.preview_path.clone(),
                // never aggregated; the frontend derives bundle state
                // from the children
                enabled: false,
            },
        }
    }
}
