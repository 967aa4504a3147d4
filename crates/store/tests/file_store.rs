//! Integration tests for the file-backed store and the archive on top of it.

use std::sync::Arc;

use nano_core::archive::{PromptArchive, HISTORY_KEY, LIBRARY_KEY, MAX_HISTORY};
use nano_core::prompt::default_prompt;
use nano_core::randomizer::random_prompt;
use nano_core::store::ByteStore;
use nano_store::FileStore;

#[test]
fn missing_slot_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.load(HISTORY_KEY).unwrap(), None);
}

#[test]
fn save_then_load_returns_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.save(LIBRARY_KEY, b"[]").unwrap();
    assert_eq!(store.load(LIBRARY_KEY).unwrap().as_deref(), Some(&b"[]"[..]));
    assert!(dir.path().join("nano_banana_library.json").exists());
    assert_eq!(leftover_temp_files(dir.path()), 0);
}

fn leftover_temp_files(root: &std::path::Path) -> usize {
    std::fs::read_dir(root)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .count()
}

#[test]
fn concurrent_library_saves_all_land_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let archive = PromptArchive::new(Arc::new(FileStore::open(dir.path()).unwrap()));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let archive = archive.clone();
            std::thread::spawn(move || archive.save_to_library(&random_prompt()).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let reopened = PromptArchive::new(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(reopened.library().len(), 6);
    assert_eq!(leftover_temp_files(dir.path()), 0);
}

#[test]
fn open_creates_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");
    let store = FileStore::open(&root).unwrap();
    assert_eq!(store.root(), root.as_path());
    assert!(root.is_dir());
}

#[test]
fn archive_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let first = random_prompt();

    {
        let archive = PromptArchive::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        archive.save_to_library(&first).unwrap();
        for _ in 0..(MAX_HISTORY + 3) {
            archive.record_history(&default_prompt()).unwrap();
        }
    }

    let archive = PromptArchive::new(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(archive.library(), vec![first]);
    assert_eq!(archive.history().len(), MAX_HISTORY);
}

#[test]
fn corrupted_file_reads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("nano_banana_history.json"), "{{{{").unwrap();
    let archive = PromptArchive::new(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert!(archive.history().is_empty());
}
