//! Save tests - store round trips and rejection of damaged files

mod common;

use std::fs;

use blockfall::core::Engine;
use blockfall::save::{decode, encode, SaveError, SaveFile, SaveStore, FORMAT_VERSION};
use blockfall::types::{PieceKind, Point};
use tempfile::TempDir;

use common::{empty_snapshot, lock, piece};

fn played_engine() -> Engine {
    let mut engine = Engine::seeded(21);
    for _ in 0..4 {
        engine.tick();
        engine.move_right();
        engine.hard_drop();
        engine.move_down();
    }
    engine.tick();
    engine
}

#[test]
fn test_save_then_load_restores_game() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path());
    let engine = played_engine();
    let snapshot = engine.snapshot();

    let path = store.save("slot1", &snapshot).unwrap();
    assert_eq!(path, dir.path().join("slot1.json"));
    assert_eq!(store.load("slot1").unwrap(), snapshot);
}

#[test]
fn test_save_creates_directory() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path().join("nested").join("saves"));
    store.save("a", &Engine::seeded(1).snapshot()).unwrap();
    assert!(store.dir().join("a.json").is_file());
}

#[test]
fn test_list_sorted_json_stems() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path());
    assert!(store.list().unwrap().is_empty());

    let snapshot = Engine::seeded(1).snapshot();
    store.save("beta", &snapshot).unwrap();
    store.save("alpha", &snapshot).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);
}

#[test]
fn test_missing_directory_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path().join("absent"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_missing_save_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path());
    assert!(matches!(store.load("nope"), Err(SaveError::NotFound(name)) if name == "nope"));
}

#[test]
fn test_bad_name_rejected() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path());
    let snapshot = Engine::seeded(1).snapshot();
    assert!(matches!(
        store.save("../escape", &snapshot),
        Err(SaveError::Name(_))
    ));
}

#[test]
fn test_corrupt_file_rejected() {
    let dir = TempDir::new().unwrap();
    let store = SaveStore::new(dir.path());
    fs::write(dir.path().join("broken.json"), "{\"version\": 1,").unwrap();
    assert!(matches!(store.load("broken"), Err(SaveError::Json(_))));
}

#[test]
fn test_impossible_state_rejected() {
    let mut snapshot = empty_snapshot(PieceKind::I, PieceKind::O);
    snapshot.current = piece(PieceKind::I, Point::new(5, 10), true);
    let text = encode(&snapshot).unwrap();

    // Lock a cell under the active piece by editing the file
    let mut file: SaveFile = serde_json::from_str(&text).unwrap();
    file.grid[11][5].locked = true;
    file.grid[11][5].color = [1, 2, 3];
    let edited = serde_json::to_string(&file).unwrap();

    let err = decode(&edited).unwrap_err();
    assert!(matches!(err, SaveError::Invalid(_)));
    assert!(err.to_string().starts_with("invalid save state"));
}

#[test]
fn test_huge_origin_rejected() {
    let snapshot = empty_snapshot(PieceKind::I, PieceKind::O);
    let mut file: SaveFile = serde_json::from_str(&encode(&snapshot).unwrap()).unwrap();
    file.current.origin = [2147483647, 0];
    let edited = serde_json::to_string(&file).unwrap();

    let err = decode(&edited).unwrap_err();
    assert!(matches!(err, SaveError::Invalid(_)));
    assert!(err.to_string().starts_with("invalid save state"));
}

#[test]
fn test_encoded_layout() {
    let mut snapshot = empty_snapshot(PieceKind::T, PieceKind::Z);
    lock(&mut snapshot, 19, 0);
    snapshot.score = 400;
    let value: serde_json::Value = serde_json::from_str(&encode(&snapshot).unwrap()).unwrap();

    assert_eq!(value["version"], FORMAT_VERSION);
    assert_eq!(value["score"], 400);
    assert_eq!(value["game_on"], true);
    assert_eq!(value["grid"].as_array().unwrap().len(), 20);
    assert_eq!(value["grid"][19][0]["locked"], true);
    assert_eq!(value["current"]["kind"], "t");
    assert_eq!(value["next"]["offsets"].as_array().unwrap().len(), 4);
    assert_eq!(value["current"]["origin"], serde_json::json!([5, 0]));
}
