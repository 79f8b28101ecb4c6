use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

use crate::core::archive::{ArchiveEntry, ArchiveReader};
use crate::core::modinfo::{self, DESCRIPTOR_NAME};
use crate::models::error::Error;

/// How much of an archive's payload `stage` materializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractMode {
    /// The whole payload.
    Full,
    /// Only entries whose base name matches the descriptor's preview image.
    PreviewOnly,
}

/// Locates the single descriptor entry of an archive.
///
/// Candidates are file entries whose base name is `modinfo.ini`; anything
/// other than exactly one disqualifies the archive.
pub fn locate_descriptor<'a>(
    entries: &'a [ArchiveEntry],
    archive_path: &Utf8Path,
) -> Result<&'a ArchiveEntry, Error> {
    let mut candidates = entries
        .iter()
        .filter(|e| !e.is_directory && e.name.file_name() == Some(DESCRIPTOR_NAME));

    match (candidates.next(), candidates.next()) {
        (Some(entry), None) => Ok(entry),
        (None, _) => Err(Error::DescriptorNotFound(archive_path.to_string())),
        (Some(_), Some(_)) => Err(Error::DescriptorAmbiguous(archive_path.to_string())),
    }
}

/// Number of path segments above the descriptor inside the archive, i.e.
/// how deep the mod's root folder is nested.
pub fn subdir_depth(descriptor: &Utf8Path) -> usize {
    descriptor.components().count().saturating_sub(1)
}

/// Drops `depth` leading segments from an entry name. `None` means the
/// entry does not reach below the archive's container folder (a top-level
/// placeholder) or its name escapes the destination; both stay unextracted.
fn strip_segments(name: &Utf8Path, depth: usize) -> Option<Utf8PathBuf> {
    let mut segments = Vec::new();
    for component in name.components() {
        match component {
            Utf8Component::Normal(s) => segments.push(s),
            Utf8Component::CurDir => {}
            _ => return None,
        }
    }

    if segments.len() <= depth {
        return None;
    }

    let mut stripped = Utf8PathBuf::new();
    for segment in &segments[depth..] {
        stripped.push(segment);
    }
    Some(stripped)
}

/// Subset extraction and staging on top of an [`ArchiveReader`].
pub struct ArchiveExtractor<'a, R: ArchiveReader> {
    reader: &'a R,
}

impl<'a, R: ArchiveReader> ArchiveExtractor<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// Extracts the named entries beneath `dest`, stripping `depth` leading
    /// path segments from each name. Archives commonly wrap their payload
    /// in one top-level folder; stripping keeps that folder's name out of
    /// the output tree.
    pub fn extract_subset(
        &self,
        archive: &[u8],
        entries: &[ArchiveEntry],
        names: &[Utf8PathBuf],
        dest: &Utf8Path,
        depth: usize,
    ) -> Result<(), Error> {
        let mut contents = self.reader.extract(archive, names)?;

        for name in names {
            let Some(rel) = strip_segments(name, depth) else {
                continue;
            };
            let target = dest.join(rel);

            let is_directory = entries
                .iter()
                .find(|e| &e.name == name)
                .map(|e| e.is_directory)
                .unwrap_or(false);

            if is_directory {
                fs::create_dir_all(&target)?;
            } else if let Some(bytes) = contents.remove(name) {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, bytes)?;
            }
        }

        Ok(())
    }

    /// Ensures the staging extraction for `archive_path` exists and returns
    /// its directory.
    ///
    /// The directory's presence is the idempotency marker: once
    /// `{staging_root}/{base_name}` exists the archive is not opened again,
    /// whatever the directory contains. A partially written directory from
    /// a crashed run, or a preview-only extraction, therefore also counts
    /// as complete; delete the directory to force a re-extract.
    pub fn stage(
        &self,
        archive_path: &Utf8Path,
        staging_root: &Utf8Path,
        mode: ExtractMode,
    ) -> Result<Utf8PathBuf, Error> {
        let base_name = archive_path
            .file_name()
            .ok_or_else(|| Error::InvalidPath(archive_path.to_string()))?;
        let target = staging_root.join(base_name);

        if target.exists() {
            return Ok(target);
        }

        let bytes = fs::read(archive_path)
            .map_err(|e| Error::ArchiveUnreadable(format!("{archive_path}: {e}")))?;
        let entries = self.reader.list_entries(&bytes)?;
        let descriptor = locate_descriptor(&entries, archive_path)?;
        let depth = subdir_depth(&descriptor.name);

        let names: Vec<Utf8PathBuf> = match mode {
            ExtractMode::Full => entries.iter().map(|e| e.name.clone()).collect(),
            ExtractMode::PreviewOnly => {
                let descriptor_name = descriptor.name.clone();
                let extracted = self
                    .reader
                    .extract(&bytes, std::slice::from_ref(&descriptor_name))?;
                let text = extracted
                    .get(&descriptor_name)
                    .map(|b| String::from_utf8_lossy(b).into_owned())
                    .unwrap_or_default();
                let info = modinfo::parse(&text);

                entries
                    .iter()
                    .filter(|e| {
                        !info.screenshot.is_empty()
                            && e.name.file_name() == Some(info.screenshot.as_str())
                    })
                    .map(|e| e.name.clone())
                    .collect()
            }
        };

        debug!("staging {archive_path} ({mode:?})");
        self.extract_subset(&bytes, &entries, &names, &target, depth)?;

        Ok(target)
    }
}
