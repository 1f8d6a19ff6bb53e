use crate::db::log::ttlog;
use crate::db::schema::{
    COMPONENTS_TABLE, create_components_table, missing_columns, recreate_components_table,
    table_exists,
};
use crate::errors::{AppError, AppResult};
use crate::utils::date::date_str_to_timestamp;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Table name used by the first releases (dates stored as `YYYY-MM-DD` text).
const LEGACY_TABLE: &str = "componentes";
const LEGACY_MIGRATION: &str = "20240110_0001_componentes_to_components";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn migration_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Path of the main database file, or None for in-memory/temporary databases.
pub fn database_path(conn: &Connection) -> Option<PathBuf> {
    conn.path()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Location of the pre-migration archive for `db_path`.
pub fn migration_backup_path(db_path: &Path) -> PathBuf {
    let stem = db_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "inventory".to_string());

    db_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}-backup_pre_migration.zip", stem))
}

/// Zip the database file next to itself before a destructive migration.
///
/// An archive left by an earlier attempt is kept as is: it holds the
/// untouched pre-migration state.
pub fn backup_before_migration(db_path: &Path) -> AppResult<PathBuf> {
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_path = migration_backup_path(db_path);
    if backup_path.exists() {
        tracing::info!(path = %backup_path.display(), "Pre-migration backup already present");
        return Ok(backup_path);
    }

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let entry = db_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "inventory.db".to_string());

    zip.start_file(entry, options)
        .map_err(|e| AppError::Migration(format!("Backup failed (start_file): {}", e)))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;

    zip.finish()
        .map_err(|e| AppError::Migration(format!("Backup failed (finish): {}", e)))?;

    tracing::info!(path = %backup_path.display(), "Backup created before migration");
    Ok(backup_path)
}

/// Move rows of the legacy `componentes` table into `components`.
/// Ids are preserved while `components` is empty; otherwise legacy rows are
/// appended with fresh ids. Text purchase dates become epoch seconds (NULL
/// when empty or unparseable).
fn migrate_legacy_table(conn: &Connection) -> AppResult<usize> {
    if !table_exists(conn, LEGACY_TABLE)? {
        return Ok(0);
    }

    tracing::warn!("Legacy '{}' table detected, migrating", LEGACY_TABLE);

    if let Some(path) = database_path(conn) {
        backup_before_migration(&path)?;
    } else {
        tracing::warn!("Could not determine DB path, backup skipped");
    }

    let legacy_rows: Vec<(i64, String, String, i32, Option<String>, Option<String>)> = {
        let mut stmt = conn.prepare(
            "SELECT id, name, type, quantity, location, purchase_date FROM componentes ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get("id")?,
                row.get("name")?,
                row.get("type")?,
                row.get("quantity")?,
                row.get("location")?,
                row.get("purchase_date")?,
            ))
        })?;

        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    let tx = conn.unchecked_transaction()?;
    create_components_table(&tx)?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM components", [], |row| row.get(0))?;
    let keep_ids = existing == 0;
    if !keep_ids {
        tracing::warn!(existing, "components already populated, legacy rows get new ids");
    }

    for (id, name, kind, quantity, location, purchase_date) in &legacy_rows {
        let ts = purchase_date.as_deref().and_then(date_str_to_timestamp);
        let location = location.as_deref().filter(|l| !l.is_empty());
        if keep_ids {
            tx.execute(
                "INSERT INTO components (id, name, type, quantity, location, purchase_timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, name, kind, quantity, location, ts],
            )?;
        } else {
            tx.execute(
                "INSERT INTO components (name, type, quantity, location, purchase_timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, kind, quantity, location, ts],
            )?;
        }
    }

    tx.execute_batch("DROP TABLE componentes;")?;
    tx.commit()?;

    ttlog(
        conn,
        "migration_applied",
        LEGACY_MIGRATION,
        &format!("Moved {} rows from componentes to components", legacy_rows.len()),
    )?;

    tracing::info!(rows = legacy_rows.len(), "Legacy table migrated");
    Ok(legacy_rows.len())
}

/// Public entry point: bring the schema to the canonical shape.
///
/// Called by `DatabaseManager::connect()` on every successful open.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Internal log table
    ensure_log_table(conn)?;

    // 2) Canonical table + indexes
    create_components_table(conn)?;

    // 3) Schema check by column name; repair when something is missing
    let missing = missing_columns(conn)?;
    if !missing.is_empty() {
        tracing::warn!(?missing, "Components table is missing columns, recreating it");
        let rows = recreate_components_table(conn)?;
        ttlog(
            conn,
            "schema_repair",
            COMPONENTS_TABLE,
            &format!("Recreated table (missing: {}), {} rows reinserted", missing.join(", "), rows),
        )?;
    }

    // 4) Legacy table from the first releases, moved into the canonical one
    if !migration_applied(conn, LEGACY_MIGRATION)? {
        migrate_legacy_table(conn)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_backup_is_not_overwritten() {
        let db_path = std::env::temp_dir().join("rinventory_backup_once.db");
        fs::write(&db_path, b"current contents").expect("write db");

        let backup = migration_backup_path(&db_path);
        fs::write(&backup, b"earlier archive").expect("write backup");

        assert_eq!(backup_before_migration(&db_path).expect("backup"), backup);
        assert_eq!(fs::read(&backup).expect("read backup"), b"earlier archive");

        let _ = fs::remove_file(&backup);
        let _ = fs::remove_file(&db_path);
    }
}
