mod common;

use mod_overlay::core::extractor::ExtractMode;
use mod_overlay::core::overlay;
use mod_overlay::core::store::EnabledMods;
use mod_overlay::models::error::Error;
use mod_overlay::{ModManager, ZipReader};
use std::fs;

fn archive_with_payload(name: &str, payload: &[(&str, &[u8])]) -> Vec<u8> {
    common::mod_archive(name, &common::descriptor(name, "1.0"), payload)
}

#[test]
fn test_enable_copies_natives_onto_overlay() {
    let (_tmp, paths) = common::setup_env();
    let archive = common::write_archive(
        &paths,
        "foo.zip",
        &archive_with_payload("Foo", &[("natives/data/a.txt", b"payload")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &archive).unwrap();

    assert_eq!(
        fs::read_to_string(paths.natives.join("data/a.txt")).unwrap(),
        "payload"
    );
    assert!(store.contains("foo.zip"));
    // the store change hit disk before enable returned
    assert!(EnabledMods::load(&paths.store).contains("foo.zip"));
}

#[test]
fn test_enable_twice_does_not_re_extract() {
    let (_tmp, paths) = common::setup_env();
    let archive = common::write_archive(
        &paths,
        "foo.zip",
        &archive_with_payload("Foo", &[("natives/a.txt", b"payload")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &archive).unwrap();

    // with staging in place the archive is never opened again
    fs::remove_file(&archive).unwrap();
    overlay::enable(&ZipReader, &paths, &mut store, &archive).unwrap();

    assert_eq!(
        fs::read_to_string(paths.natives.join("a.txt")).unwrap(),
        "payload"
    );
    assert_eq!(store.enabled_mods, vec!["foo.zip"]);
}

#[test]
fn test_colliding_paths_last_enabled_wins_and_disable_restores() {
    let (_tmp, paths) = common::setup_env();
    let a = common::write_archive(
        &paths,
        "a.zip",
        &archive_with_payload(
            "A",
            &[("natives/shared.txt", b"AAA"), ("natives/only_a.txt", b"a")],
        ),
    );
    let b = common::write_archive(
        &paths,
        "b.zip",
        &archive_with_payload("B", &[("natives/shared.txt", b"BBB")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &a).unwrap();
    overlay::enable(&ZipReader, &paths, &mut store, &b).unwrap();

    // later-enabled mod owns the colliding path
    assert_eq!(
        fs::read_to_string(paths.natives.join("shared.txt")).unwrap(),
        "BBB"
    );

    // disabling B replays A, so A's version comes back
    overlay::disable(&ZipReader, &paths, &mut store, "b.zip").unwrap();
    assert_eq!(
        fs::read_to_string(paths.natives.join("shared.txt")).unwrap(),
        "AAA"
    );
    assert!(paths.natives.join("only_a.txt").exists());

    // disabling the last mod leaves an empty overlay
    overlay::disable(&ZipReader, &paths, &mut store, "a.zip").unwrap();
    assert!(paths.natives.read_dir_utf8().unwrap().next().is_none());
}

#[test]
fn test_disable_only_enabled_mod_empties_overlay() {
    let (_tmp, paths) = common::setup_env();
    let archive = common::write_archive(
        &paths,
        "foo.zip",
        &archive_with_payload("Foo", &[("natives/a.txt", b"payload")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &archive).unwrap();
    overlay::disable(&ZipReader, &paths, &mut store, "foo.zip").unwrap();

    assert!(store.enabled_mods.is_empty());
    assert!(paths.natives.exists());
    assert!(paths.natives.read_dir_utf8().unwrap().next().is_none());
}

#[test]
fn test_rebuild_restages_when_staging_was_cleared() {
    let (_tmp, paths) = common::setup_env();
    let a = common::write_archive(
        &paths,
        "a.zip",
        &archive_with_payload("A", &[("natives/a.txt", b"from a")]),
    );
    let b = common::write_archive(
        &paths,
        "b.zip",
        &archive_with_payload("B", &[("natives/b.txt", b"from b")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &a).unwrap();
    overlay::enable(&ZipReader, &paths, &mut store, &b).unwrap();

    // someone cleaned the staging cache behind our back
    fs::remove_dir_all(&paths.staging).unwrap();

    overlay::disable(&ZipReader, &paths, &mut store, "b.zip").unwrap();

    assert_eq!(
        fs::read_to_string(paths.natives.join("a.txt")).unwrap(),
        "from a"
    );
    assert!(!paths.natives.join("b.txt").exists());
}

#[test]
fn test_rebuild_skips_ghost_entries() {
    let (_tmp, paths) = common::setup_env();
    let a = common::write_archive(
        &paths,
        "a.zip",
        &archive_with_payload("A", &[("natives/a.txt", b"from a")]),
    );
    let b = common::write_archive(
        &paths,
        "b.zip",
        &archive_with_payload("B", &[("natives/b.txt", b"from b")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &a).unwrap();
    overlay::enable(&ZipReader, &paths, &mut store, &b).unwrap();

    // a.zip vanished entirely: staging and archive both gone
    fs::remove_dir_all(paths.staging_dir("a.zip")).unwrap();
    fs::remove_file(&a).unwrap();

    // the ghost is skipped, the rest of the rebuild still happens
    overlay::disable(&ZipReader, &paths, &mut store, "b.zip").unwrap();
    assert!(paths.natives.read_dir_utf8().unwrap().next().is_none());
}

#[test]
fn test_enable_mod_without_natives_payload_is_harmless() {
    let (_tmp, paths) = common::setup_env();
    let archive = common::write_archive(
        &paths,
        "docs.zip",
        &archive_with_payload("Docs", &[("readme.txt", b"just docs")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &archive).unwrap();

    assert!(store.contains("docs.zip"));
    assert!(
        !paths.natives.exists()
            || paths.natives.read_dir_utf8().unwrap().next().is_none()
    );
}

#[test]
fn test_store_records_enable_order() {
    let (_tmp, paths) = common::setup_env();
    let b = common::write_archive(
        &paths,
        "b.zip",
        &archive_with_payload("B", &[("natives/b.txt", b"b")]),
    );
    let a = common::write_archive(
        &paths,
        "a.zip",
        &archive_with_payload("A", &[("natives/a.txt", b"a")]),
    );

    let mut store = EnabledMods::default();
    overlay::enable(&ZipReader, &paths, &mut store, &b).unwrap();
    overlay::enable(&ZipReader, &paths, &mut store, &a).unwrap();

    assert_eq!(
        EnabledMods::load(&paths.store).enabled_mods,
        vec!["b.zip", "a.zip"]
    );
}

#[test]
fn test_manager_toggle_round_trip() {
    let (_tmp, paths) = common::setup_env();
    common::write_archive(
        &paths,
        "foo.zip",
        &archive_with_payload("Foo", &[("natives/a.txt", b"payload")]),
    );

    let manager = ModManager::with_paths(ZipReader, paths.clone(), ExtractMode::Full);

    let mods = manager.list_mods().unwrap();
    assert_eq!(mods.len(), 1);
    assert!(!mods[0].enabled);

    assert!(manager.toggle(&mods[0]).unwrap());
    assert!(paths.natives.join("a.txt").exists());

    let mods = manager.list_mods().unwrap();
    assert!(mods[0].enabled);

    assert!(!manager.toggle(&mods[0]).unwrap());
    assert!(!paths.natives.join("a.txt").exists());
}

#[test]
fn test_manager_rejects_toggling_a_bundle() {
    let (_tmp, paths) = common::setup_env();
    common::write_archive(
        &paths,
        "a.zip",
        &common::mod_archive("A", "name=A\nNameAsBundle=Pack\n", &[]),
    );
    common::write_archive(
        &paths,
        "b.zip",
        &common::mod_archive("B", "name=B\nNameAsBundle=Pack\n", &[]),
    );

    let manager = ModManager::with_paths(ZipReader, paths.clone(), ExtractMode::Full);

    let mods = manager.list_mods().unwrap();
    assert!(mods[0].is_bundle);

    match manager.toggle(&mods[0]) {
        Err(Error::NoBackingArchive(name)) => assert_eq!(name, "Pack"),
        other => panic!("expected NoBackingArchive, got {other:?}"),
    }

    // per-child toggling is the supported path
    assert!(manager.toggle(&mods[0].children[0]).unwrap());
}
