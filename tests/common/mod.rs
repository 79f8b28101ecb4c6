#![allow(dead_code)]

use camino::Utf8PathBuf;
use mod_overlay::models::paths::AppPaths;
use std::fs;
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Sets up a throwaway workspace with every path (mods folder, overlay,
/// staging, store file) rooted inside a tempdir.
pub fn setup_env() -> (TempDir, AppPaths) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let paths = AppPaths::new(&root);
    fs::create_dir_all(&paths.mods).unwrap();

    (tmp, paths)
}

/// Builds an in-memory mod archive wrapped in a single `top` folder, the
/// layout mod archives ship with in the wild. `files` are payload entries
/// relative to `top`.
pub fn mod_archive(top: &str, descriptor: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.add_directory(format!("{top}/"), options).unwrap();
    zip.start_file(format!("{top}/modinfo.ini"), options).unwrap();
    zip.write_all(descriptor.as_bytes()).unwrap();

    for (name, content) in files {
        zip.start_file(format!("{top}/{name}"), options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Builds an archive with no wrapping folder: payload sits at the top
/// level next to modinfo.ini.
pub fn flat_archive(descriptor: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("modinfo.ini", options).unwrap();
    zip.write_all(descriptor.as_bytes()).unwrap();

    for (name, content) in files {
        zip.start_file(name.to_string(), options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Writes archive bytes into the workspace's mods folder.
pub fn write_archive(paths: &AppPaths, file_name: &str, bytes: &[u8]) -> Utf8PathBuf {
    let path = paths.mods.join(file_name);
    fs::write(&path, bytes).unwrap();
    path
}

/// A minimal descriptor with the usual fields filled in.
pub fn descriptor(name: &str, version: &str) -> String {
    format!("name={name}\nversion={version}\nauthor=someone\n")
}
