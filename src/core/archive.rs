use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use camino::Utf8PathBuf;

use crate::models::error::Error;

/// One row of an archive's file table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: Utf8PathBuf,
    pub is_directory: bool,
}

/// Capability for decoding compressed mod archives.
///
/// The core never decompresses anything itself; it lists entries, picks the
/// ones it wants and asks for their bytes. Implementations work on the raw
/// archive bytes so callers stay in control of how archives are read.
pub trait ArchiveReader {
    /// Lists the archive's file table in archive order.
    fn list_entries(&self, archive: &[u8]) -> Result<Vec<ArchiveEntry>, Error>;

    /// Extracts the named file entries. Directory entries and names absent
    /// from the archive are skipped, not errors.
    fn extract(
        &self,
        archive: &[u8],
        names: &[Utf8PathBuf],
    ) -> Result<BTreeMap<Utf8PathBuf, Vec<u8>>, Error>;
}

/// `ArchiveReader` backed by the `zip` crate.
#[derive(Default, Clone, Copy, Debug)]
pub struct ZipReader;

impl ArchiveReader for ZipReader {
    fn list_entries(&self, archive: &[u8]) -> Result<Vec<ArchiveEntry>, Error> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;

        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let file = zip.by_index(i)?;
            entries.push(ArchiveEntry {
                name: Utf8PathBuf::from(file.name()),
                is_directory: file.is_dir(),
            });
        }

        Ok(entries)
    }

    fn extract(
        &self,
        archive: &[u8],
        names: &[Utf8PathBuf],
    ) -> Result<BTreeMap<Utf8PathBuf, Vec<u8>>, Error> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;

        let mut contents = BTreeMap::new();
        for name in names {
            let mut file = match zip.by_name(name.as_str()) {
                Ok(file) => file,
                Err(zip::result::ZipError::FileNotFound) => continue,
                Err(e) => return Err(e.into()),
            };
            if file.is_dir() {
                continue;
            }

            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)
                .map_err(|e| Error::ArchiveUnreadable(format!("{name}: {e}")))?;
            contents.insert(name.clone(), bytes);
        }

        Ok(contents)
    }
}
