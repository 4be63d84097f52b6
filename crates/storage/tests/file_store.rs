use std::path::PathBuf;

use storage::{FileTokenStore, TokenRepository};

struct TempDir(PathBuf);

impl TempDir {
    fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "quiz-token-store-{label}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        Self(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn file_store_round_trip() {
    let dir = TempDir::new("round-trip");
    let store = FileTokenStore::new(dir.0.join("token"));

    assert!(store.load().unwrap().is_none());

    store.save("header.payload.signature").unwrap();
    assert_eq!(
        store.load().unwrap().as_deref(),
        Some("header.payload.signature")
    );

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn file_store_creates_missing_parent_dirs() {
    let dir = TempDir::new("parents");
    let store = FileTokenStore::new(dir.0.join("nested").join("deeper").join("token"));

    store.save("tok").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok"));
}

#[test]
fn clear_twice_is_harmless() {
    let dir = TempDir::new("clear-twice");
    let store = FileTokenStore::new(dir.0.join("token"));

    store.save("tok").unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn whitespace_only_file_reads_as_signed_out() {
    let dir = TempDir::new("whitespace");
    let path = dir.0.join("token");
    std::fs::create_dir_all(&dir.0).unwrap();
    std::fs::write(&path, "\n  \n").unwrap();

    let store = FileTokenStore::new(path);
    assert!(store.load().unwrap().is_none());
}
