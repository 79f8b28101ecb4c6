use crate::models::error::Error;
use camino::Utf8Path;
use std::fs;
use walkdir::WalkDir;

pub struct FileUtils;

impl FileUtils {
    /// Recursively copies `src` onto `dst`, creating directories as needed.
    /// Files already present at colliding paths are overwritten; everything
    /// else in `dst` is left alone.
    pub fn copy_recursive(src: &Utf8Path, dst: &Utf8Path) -> Result<(), Error> {
        fs::create_dir_all(dst)?;

        for entry in WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
            let src_path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                Error::InvalidPath(format!("non UTF-8 path: {:?}", entry.path()))
            })?;

            let rel_path = src_path
                .strip_prefix(src)
                .map_err(|e| Error::InvalidPath(e.to_string()))?;
            let dst_path = dst.join(rel_path);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dst_path)?;
            } else {
                if let Some(parent) = dst_path.parent() {
                    if !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::copy(src_path, &dst_path)?;
            }
        }

        Ok(())
    }

    /// Removes every entry inside `dir` without removing `dir` itself.
    /// A missing `dir` is created empty.
    pub fn empty_dir(dir: &Utf8Path) -> Result<(), Error> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            return Ok(());
        }

        for entry in dir.read_dir_utf8()? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }
}
