use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::warn;

use crate::core::archive::ArchiveReader;
use crate::core::bundles;
use crate::core::extractor::{locate_descriptor, ArchiveExtractor, ExtractMode};
use crate::core::modinfo;
use crate::core::store::EnabledMods;
use crate::models::error::Error;
use crate::models::mod_dto::{ModEntry, ModNode};
use crate::models::paths::AppPaths;

/// Archive file extension picked up by discovery.
pub const ARCHIVE_EXT: &str = "zip";

/// Builds the mod catalog from the archives in the mods folder.
pub struct CatalogBuilder<'a, R: ArchiveReader> {
    reader: &'a R,
    paths: &'a AppPaths,
    staging_mode: ExtractMode,
}

impl<'a, R: ArchiveReader> CatalogBuilder<'a, R> {
    pub fn new(reader: &'a R, paths: &'a AppPaths, staging_mode: ExtractMode) -> Self {
        Self {
            reader,
            paths,
            staging_mode,
        }
    }

    /// Lists candidate archives in the mods folder, sorted by path.
    /// The extension match is case-sensitive: `Foo.ZIP` is not picked up.
    /// Directories are excluded even when their name matches.
    pub fn list_archives(&self) -> Result<Vec<Utf8PathBuf>, Error> {
        let mut archives = Vec::new();
        for entry in self.paths.mods.read_dir_utf8()? {
            let path = entry?.into_path();
            if path.is_file() && path.extension() == Some(ARCHIVE_EXT) {
                archives.push(path);
            }
        }

        archives.sort();
        Ok(archives)
    }

    /// Reads one archive's descriptor into a leaf entry, `enabled` unset.
    pub fn read_mod_archive(&self, archive_path: &Utf8Path) -> Result<ModEntry, Error> {
        let bytes = fs::read(archive_path)
            .map_err(|e| Error::ArchiveUnreadable(format!("{archive_path}: {e}")))?;
        let entries = self.reader.list_entries(&bytes)?;
        let descriptor = locate_descriptor(&entries, archive_path)?;

        let extracted = self
            .reader
            .extract(&bytes, std::slice::from_ref(&descriptor.name))?;
        let text = extracted
            .get(&descriptor.name)
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        let info = modinfo::parse(&text);

        Ok(ModEntry {
            file_path: archive_path.to_owned(),
            name: info.name,
            bundle_name: info.name_as_bundle,
            description: info.description,
            author: info.author,
            version: info.version,
            preview_path: info.screenshot,
            enabled: false,
        })
    }

    /// Builds the bundle-resolved catalog.
    ///
    /// One bad archive never takes the catalog down: unreadable archives
    /// and descriptor failures are logged and skipped. Only an unreadable
    /// mods folder is fatal. Staging extraction (per `staging_mode`) is
    /// guaranteed for every cataloged mod as a side effect, so previews
    /// are on disk before the list is rendered.
    pub fn build(&self, store: &EnabledMods) -> Result<Vec<ModNode>, Error> {
        let extractor = ArchiveExtractor::new(self.reader);

        let mut leaves = Vec::new();
        for archive_path in self.list_archives()? {
            let mut entry = match self.read_mod_archive(&archive_path) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping {archive_path}: {e}");
                    continue;
                }
            };
            entry.enabled = store.contains(entry.base_name());

            let staged = extractor.stage(&archive_path, &self.paths.staging, self.staging_mode);
            if let Err(e) = staged {
                warn!("skipping {archive_path}: staging failed: {e}");
                continue;
            }

            leaves.push(entry);
        }

        Ok(bundles::resolve(leaves))
    }
}
