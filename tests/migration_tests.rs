mod common;

use common::setup_test_db;
use rinventory::DatabaseManager;
use rinventory::db::log::load_log;
use rinventory::db::migrate::migration_backup_path;
use rinventory::db::schema::{COMPONENT_COLUMNS, table_columns, table_exists};
use rinventory::utils::date::date_str_to_timestamp;
use rusqlite::{Connection, params};
use std::path::Path;

fn connect(path: &str) -> DatabaseManager {
    let mut db = DatabaseManager::with_path(path);
    db.connect(None).expect("connect");
    db
}

#[test]
fn test_fresh_database_gets_canonical_schema_and_indexes() {
    let path = setup_test_db("schema_fresh");
    let db = connect(&path);
    let conn = db.connection().expect("connected");

    assert_eq!(
        table_columns(conn, "components").expect("columns"),
        COMPONENT_COLUMNS.to_vec()
    );

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='components' ORDER BY name")
        .expect("prepare");
    let indexes: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("query")
        .map(|r| r.expect("row"))
        .filter(|n: &String| !n.starts_with("sqlite_"))
        .collect();
    assert_eq!(
        indexes,
        vec![
            "idx_components_location",
            "idx_components_name",
            "idx_components_type"
        ]
    );
}

#[test]
fn test_rows_decode_by_column_name_not_position() {
    let path = setup_test_db("schema_reordered");
    {
        let conn = Connection::open(&path).expect("open raw");
        conn.execute_batch(
            r#"
            CREATE TABLE components (
                purchase_timestamp  INTEGER,
                location            TEXT,
                quantity            INTEGER NOT NULL DEFAULT 0,
                type                TEXT NOT NULL,
                name                TEXT NOT NULL,
                id                  INTEGER PRIMARY KEY AUTOINCREMENT
            );
            "#,
        )
        .expect("create reordered table");
        conn.execute(
            "INSERT INTO components (name, type, quantity, location, purchase_timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params!["Crystal 16MHz", "Oscillator", 4, "Bin D", 1_690_000_000i64],
        )
        .expect("insert");
    }

    let db = connect(&path);
    let all = db.get_all_components().expect("all");
    assert_eq!(all.len(), 1);

    let c = &all[0];
    assert_eq!(c.name, "Crystal 16MHz");
    assert_eq!(c.kind, "Oscillator");
    assert_eq!(c.quantity, 4);
    assert_eq!(c.location.as_deref(), Some("Bin D"));
    assert_eq!(c.purchase_timestamp, Some(1_690_000_000));
}

#[test]
fn test_missing_column_triggers_repair() {
    let path = setup_test_db("schema_repair");
    {
        let conn = Connection::open(&path).expect("open raw");
        conn.execute_batch(
            r#"
            CREATE TABLE components (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                name     TEXT NOT NULL,
                type     TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                location TEXT
            );
            INSERT INTO components (name, type, quantity, location) VALUES ('Fuse 1A', 'Fuse', 12, 'Box');
            INSERT INTO components (name, type, quantity, location) VALUES ('Fuse 2A', 'Fuse', 1, NULL);
            "#,
        )
        .expect("create old table");
    }

    let db = connect(&path);
    let conn = db.connection().expect("connected");
    assert_eq!(
        table_columns(conn, "components").expect("columns"),
        COMPONENT_COLUMNS.to_vec()
    );

    let all = db.get_all_components().expect("all");
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|c| c.purchase_timestamp.is_none()));
    assert_eq!(all[0].location.as_deref(), Some("Box"));
    assert_eq!(all[1].quantity, 1);

    let log = load_log(conn).expect("log");
    assert!(log.iter().any(|(_, _, op, _, _)| op == "schema_repair"));
}

#[test]
fn test_legacy_table_is_migrated() {
    let path = setup_test_db("schema_legacy");
    {
        let conn = Connection::open(&path).expect("open raw");
        conn.execute_batch(
            r#"
            CREATE TABLE componentes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                location TEXT NOT NULL,
                purchase_date TEXT NOT NULL
            );
            INSERT INTO componentes (id, name, type, quantity, location, purchase_date)
                VALUES (3, 'Transistor BC547', 'Transistor', 30, 'Bin E', '2023-05-01');
            INSERT INTO componentes (id, name, type, quantity, location, purchase_date)
                VALUES (7, 'Zener 5V1', 'Diode', 2, '', 'not a date');
            "#,
        )
        .expect("create legacy table");
    }

    let db = connect(&path);
    let conn = db.connection().expect("connected");
    assert!(!table_exists(conn, "componentes").expect("exists check"));

    let transistor = db.get_component(3).expect("get").expect("id preserved");
    assert_eq!(transistor.name, "Transistor BC547");
    assert_eq!(
        transistor.purchase_timestamp,
        date_str_to_timestamp("2023-05-01")
    );

    let zener = db.get_component(7).expect("get").expect("id preserved");
    assert_eq!(zener.location, None);
    assert_eq!(zener.purchase_timestamp, None);

    // new rows continue after the highest migrated id
    let id = db
        .add_component(&rinventory::Component::new("New", "X", 1, None, None))
        .expect("add");
    assert!(id > 7);

    let log = load_log(conn).expect("log");
    assert!(log.iter().any(|(_, _, op, _, _)| op == "migration_applied"));
}

#[test]
fn test_reconnect_does_not_repeat_migrations() {
    let path = setup_test_db("schema_idempotent");
    {
        let db = connect(&path);
        db.add_component(&rinventory::Component::new("Cap", "Capacitor", 9, None, None))
            .expect("add");
    }

    let db = connect(&path);
    let conn = db.connection().expect("connected");
    let log = load_log(conn).expect("log");
    assert!(!log.iter().any(|(_, _, op, _, _)| op == "schema_repair"));
    assert_eq!(db.get_component_count().expect("count"), 1);
}

#[test]
fn test_legacy_rows_join_a_populated_components_table() {
    let path = setup_test_db("schema_both_tables");
    let backup = migration_backup_path(Path::new(&path));
    std::fs::remove_file(&backup).ok();
    {
        let conn = Connection::open(&path).expect("open raw");
        conn.execute_batch(
            r#"
            CREATE TABLE componentes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                location TEXT NOT NULL,
                purchase_date TEXT NOT NULL
            );
            INSERT INTO componentes (id, name, type, quantity, location, purchase_date)
                VALUES (1, 'Old Relay', 'Relay', 4, 'Crate', '2022-01-10');
            CREATE TABLE components (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                name                TEXT NOT NULL,
                type                TEXT NOT NULL,
                quantity            INTEGER NOT NULL DEFAULT 0,
                location            TEXT,
                purchase_timestamp  INTEGER
            );
            INSERT INTO components (id, name, type, quantity, location, purchase_timestamp)
                VALUES (1, 'New Switch', 'Switch', 9, 'Bin F', NULL);
            "#,
        )
        .expect("create both tables");
    }

    let db = connect(&path);
    let conn = db.connection().expect("connected");
    assert!(!table_exists(conn, "componentes").expect("exists check"));

    let switch = db.get_component(1).expect("get").expect("existing row kept");
    assert_eq!(switch.name, "New Switch");

    let all = db.get_all_components().expect("all");
    assert_eq!(all.len(), 2);
    let relay = all
        .iter()
        .find(|c| c.name == "Old Relay")
        .expect("legacy row migrated");
    assert_ne!(relay.id, Some(1));
    assert_eq!(relay.purchase_timestamp, date_str_to_timestamp("2022-01-10"));
    assert!(backup.exists());
    drop(db);

    // the migration is recorded, so later opens neither fail nor back up again
    std::fs::remove_file(&backup).expect("remove backup");
    let db = connect(&path);
    assert_eq!(db.get_component_count().expect("count"), 2);
    assert!(!backup.exists());
}
