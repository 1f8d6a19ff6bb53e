//! Parameterised statements over the `components` table.
//! Every SELECT names its columns and every row is decoded by column name.

use crate::errors::AppResult;
use crate::models::Component;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_COMPONENT: &str =
    "SELECT id, name, type, quantity, location, purchase_timestamp FROM components";

pub fn map_row(row: &Row) -> Result<Component> {
    Ok(Component {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        kind: row.get("type")?,
        quantity: row.get("quantity")?,
        location: row.get("location")?,
        purchase_timestamp: row.get("purchase_timestamp")?,
    })
}

fn collect(conn: &Connection, sql: &str, args: impl rusqlite::Params) -> AppResult<Vec<Component>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a component; any id carried by `c` is ignored.
/// Returns the id assigned by SQLite.
pub fn insert_component(conn: &Connection, c: &Component) -> AppResult<i64> {
    conn.prepare_cached(
        "INSERT INTO components (name, type, quantity, location, purchase_timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?
    .execute(params![
        c.name,
        c.kind,
        c.quantity,
        c.location,
        c.purchase_timestamp,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite all mutable fields of the row with id `id`.
/// Returns the number of rows changed (0 or 1).
pub fn update_component(conn: &Connection, id: i64, c: &Component) -> AppResult<usize> {
    let changed = conn
        .prepare_cached(
            "UPDATE components
             SET name = ?1, type = ?2, quantity = ?3,
                 location = ?4, purchase_timestamp = ?5
             WHERE id = ?6",
        )?
        .execute(params![
            c.name,
            c.kind,
            c.quantity,
            c.location,
            c.purchase_timestamp,
            id,
        ])?;
    Ok(changed)
}

pub fn delete_component(conn: &Connection, id: i64) -> AppResult<usize> {
    let changed = conn
        .prepare_cached("DELETE FROM components WHERE id = ?1")?
        .execute([id])?;
    Ok(changed)
}

pub fn load_component(conn: &Connection, id: i64) -> AppResult<Option<Component>> {
    let sql = format!("{SELECT_COMPONENT} WHERE id = ?1");
    let found = conn
        .prepare_cached(&sql)?
        .query_row([id], map_row)
        .optional()?;
    Ok(found)
}

pub fn load_all_components(conn: &Connection) -> AppResult<Vec<Component>> {
    let sql = format!("{SELECT_COMPONENT} ORDER BY name ASC, id ASC");
    collect(conn, &sql, [])
}

/// Rows where name, type or location contains `keyword` (case-sensitive
/// substring, `instr`). An empty keyword matches every row.
pub fn search_components(conn: &Connection, keyword: &str) -> AppResult<Vec<Component>> {
    let sql = format!(
        "{SELECT_COMPONENT}
         WHERE instr(name, ?1) > 0
            OR instr(type, ?1) > 0
            OR instr(location, ?1) > 0
         ORDER BY name ASC, id ASC"
    );
    collect(conn, &sql, [keyword])
}

pub fn load_low_stock(conn: &Connection, threshold: i32) -> AppResult<Vec<Component>> {
    let sql = format!(
        "{SELECT_COMPONENT}
         WHERE quantity <= ?1
         ORDER BY quantity ASC, name ASC"
    );
    collect(conn, &sql, [threshold])
}

pub fn count_components(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM components", [], |row| row.get(0))?;
    Ok(n)
}

pub fn load_types(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT DISTINCT type FROM components ORDER BY type ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>("type"))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
