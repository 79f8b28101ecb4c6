use parking_lot::Mutex;

use crate::config::AppSettings;
use crate::core::archive::{ArchiveReader, ZipReader};
use crate::core::catalog::CatalogBuilder;
use crate::core::extractor::ExtractMode;
use crate::core::overlay;
use crate::core::store::EnabledMods;
use crate::models::error::Error;
use crate::models::mod_dto::Mod;
use crate::models::paths::AppPaths;

/// Facade over catalog, store and overlay: the surface the frontend talks
/// to.
///
/// The overlay, the staging cache and the enabled-mod store are
/// single-writer resources, so an internal mutex serializes operations:
/// a toggle never interleaves with another toggle or a catalog build on
/// the same manager. Exclusion across processes is the embedder's concern.
pub struct ModManager<R: ArchiveReader = ZipReader> {
    reader: R,
    paths: AppPaths,
    staging_mode: ExtractMode,
    op_lock: Mutex<()>,
}

impl ModManager<ZipReader> {
    pub fn new(settings: &AppSettings) -> Self {
        Self::with_reader(ZipReader, settings)
    }
}

impl<R: ArchiveReader> ModManager<R> {
    pub fn with_reader(reader: R, settings: &AppSettings) -> Self {
        let staging_mode = if settings.preview_only_staging {
            ExtractMode::PreviewOnly
        } else {
            ExtractMode::Full
        };
        Self::with_paths(reader, settings.paths(), staging_mode)
    }

    pub fn with_paths(reader: R, paths: AppPaths, staging_mode: ExtractMode) -> Self {
        Self {
            reader,
            paths,
            staging_mode,
            op_lock: Mutex::new(()),
        }
    }

    /// The bundle-resolved mod tree with current enabled state.
    pub fn list_mods(&self) -> Result<Vec<Mod>, Error> {
        let _op = self.op_lock.lock();

        let store = EnabledMods::load(&self.paths.store);
        let catalog =
            CatalogBuilder::new(&self.reader, &self.paths, self.staging_mode).build(&store)?;
        Ok(catalog.iter().map(|node| node.to_dto()).collect())
    }

    /// Flips a mod's enabled state and returns the new state.
    ///
    /// Bundles have no archive of their own and are rejected; toggle their
    /// children instead.
    pub fn toggle(&self, m: &Mod) -> Result<bool, Error> {
        let _op = self.op_lock.lock();

        let archive_path = m
            .file_path
            .as_ref()
            .ok_or_else(|| Error::NoBackingArchive(m.name.clone()))?;
        let base_name = archive_path
            .file_name()
            .ok_or_else(|| Error::InvalidPath(archive_path.to_string()))?;

        let mut store = EnabledMods::load(&self.paths.store);
        if store.contains(base_name) {
            overlay::disable(&self.reader, &self.paths, &mut store, base_name)?;
            Ok(false)
        } else {
            overlay::enable(&self.reader, &self.paths, &mut store, archive_path)?;
            Ok(true)
        }
    }
}
