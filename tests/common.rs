#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rinventory::{Component, DatabaseManager};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rinv() -> Command {
    cargo_bin_cmd!("rinventory")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rinventory.db", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Connected manager on a fresh database file
pub fn fresh_manager(name: &str) -> DatabaseManager {
    let path = setup_test_db(name);
    let mut db = DatabaseManager::with_path(&path);
    db.connect(None).expect("connect test db");
    db
}

/// A small, varied inventory: (name, type, qty, location, timestamp)
pub fn sample_components() -> Vec<Component> {
    vec![
        Component::new("Resistor 1k", "Resistor", 20, Some("Bin A".into()), Some(1_700_000_000)),
        Component::new("Capacitor 10uF", "Capacitor", 3, Some("Bin B".into()), None),
        Component::new("NE555", "IC", 0, Some("Drawer 2".into()), Some(1_650_000_000)),
        Component::new("LED red", "Diode", 5, None, Some(1_600_000_000)),
        Component::new("Arduino Nano", "Board", 7, Some("Shelf 1".into()), None),
    ]
}

/// Insert `sample_components()` and return the assigned ids, in the same order
pub fn populate(db: &DatabaseManager) -> Vec<i64> {
    sample_components()
        .iter()
        .map(|c| db.add_component(c).expect("insert sample"))
        .collect()
}

/// Initialize a database through the CLI
pub fn init_db(db_path: &str) {
    rinv()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
