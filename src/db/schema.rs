//! Canonical schema of the `components` table and the repair procedure.

use crate::db::queries::insert_component;
use crate::errors::AppResult;
use crate::models::Component;
use rusqlite::{Connection, OptionalExtension, Result};

pub const COMPONENTS_TABLE: &str = "components";

/// Canonical column order. Reads never rely on it (rows are decoded by name),
/// it only drives table creation and repair.
pub const COMPONENT_COLUMNS: [&str; 6] = [
    "id",
    "name",
    "type",
    "quantity",
    "location",
    "purchase_timestamp",
];

const CREATE_COMPONENTS_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS components (
        id                  INTEGER PRIMARY KEY AUTOINCREMENT,
        name                TEXT NOT NULL,
        type                TEXT NOT NULL,
        quantity            INTEGER NOT NULL DEFAULT 0,
        location            TEXT,
        purchase_timestamp  INTEGER
    );
"#;

const CREATE_INDEXES_SQL: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_components_name ON components(name);
    CREATE INDEX IF NOT EXISTS idx_components_type ON components(type);
    CREATE INDEX IF NOT EXISTS idx_components_location ON components(location);
"#;

const DROP_COMPONENTS_SQL: &str = r#"
    DROP INDEX IF EXISTS idx_components_name;
    DROP INDEX IF EXISTS idx_components_type;
    DROP INDEX IF EXISTS idx_components_location;
    DROP TABLE IF EXISTS components;
"#;

/// Create the `components` table and its three indexes if missing.
pub fn create_components_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_COMPONENTS_SQL)?;
    conn.execute_batch(CREATE_INDEXES_SQL)?;
    Ok(())
}

pub fn drop_components_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(DROP_COMPONENTS_SQL)
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of `table`, in physical order.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>("name"))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Canonical columns absent from the live `components` table.
pub fn missing_columns(conn: &Connection) -> Result<Vec<&'static str>> {
    let present = table_columns(conn, COMPONENTS_TABLE)?;
    Ok(COMPONENT_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.iter().any(|p| p == c))
        .collect())
}

/// Read every row of the live table, tolerating missing columns.
///
/// A missing column is substituted with its default (`''` for the required
/// text columns, `0` for quantity, NULL for the optional ones).
fn buffer_rows(conn: &Connection) -> AppResult<Vec<Component>> {
    let present = table_columns(conn, COMPONENTS_TABLE)?;
    let has = |c: &str| present.iter().any(|p| p == c);

    let select = |col: &str, fallback: &str| {
        if has(col) {
            col.to_string()
        } else {
            format!("{} AS {}", fallback, col)
        }
    };

    let sql = format!(
        "SELECT {}, {}, {}, {}, {} FROM components ORDER BY {}",
        select("name", "''"),
        select("type", "''"),
        select("quantity", "0"),
        select("location", "NULL"),
        select("purchase_timestamp", "NULL"),
        if has("id") { "id ASC" } else { "rowid ASC" },
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Component {
            id: None,
            name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
            kind: row.get::<_, Option<String>>("type")?.unwrap_or_default(),
            quantity: row.get::<_, Option<i32>>("quantity")?.unwrap_or(0),
            location: row.get("location")?,
            purchase_timestamp: row.get("purchase_timestamp")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rebuild the `components` table from the canonical schema.
///
/// 1. buffer all rows in memory
/// 2. drop the table and its indexes
/// 3. recreate table and indexes
/// 4. reinsert every buffered row as a fresh insert (ids are reassigned)
///
/// Not atomic: a crash between 2 and 4 leaves a partially populated table.
/// Returns the number of reinserted rows.
pub fn recreate_components_table(conn: &Connection) -> AppResult<usize> {
    let rows = if table_exists(conn, COMPONENTS_TABLE)? {
        buffer_rows(conn)?
    } else {
        Vec::new()
    };

    tracing::info!(rows = rows.len(), "Recreating components table");

    drop_components_table(conn)?;
    create_components_table(conn)?;

    for c in &rows {
        insert_component(conn, c)?;
    }

    Ok(rows.len())
}
