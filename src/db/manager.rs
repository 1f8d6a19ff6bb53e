//! Owner of the single SQLite connection holding the `components` table.
//!
//! The manager is either disconnected (`conn == None`) or connected to one
//! database file. Every query checks the state first and fails with
//! `AppError::NotConnected` instead of reconnecting on its own. Dropping the
//! manager closes the connection.

use crate::db::log::ttlog_best_effort;
use crate::db::migrate::run_pending_migrations;
use crate::db::queries;
use crate::db::schema::recreate_components_table;
use crate::errors::{AppError, AppResult};
use crate::models::Component;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Database file used when no path is configured.
pub const DEFAULT_DB_FILE: &str = "inventory.db";

#[derive(Debug)]
pub struct DatabaseManager {
    path: PathBuf,
    conn: Option<Connection>,
}

impl Default for DatabaseManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseManager {
    /// Disconnected manager pointing at `inventory.db` in the working directory.
    pub fn new() -> Self {
        Self::with_path(DEFAULT_DB_FILE)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    /// Open `path` (or the configured one) and ensure the schema.
    ///
    /// An already open connection is closed first. On any failure the
    /// manager stays disconnected and keeps its previous path; there is no
    /// retry.
    pub fn connect(&mut self, path: Option<&Path>) -> AppResult<()> {
        self.disconnect();

        let target = path.map_or_else(|| self.path.clone(), Path::to_path_buf);

        let conn = Connection::open(&target).inspect_err(|e| {
            warn!(path = %target.display(), error = %e, "Failed to open database");
        })?;

        run_pending_migrations(&conn).inspect_err(|e| {
            warn!(path = %target.display(), error = %e, "Schema initialisation failed");
        })?;

        info!(path = %target.display(), "Database connected");
        self.path = target;
        self.conn = Some(conn);
        Ok(())
    }

    /// Close the connection if open. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                warn!(error = %e, "Error while closing database");
            } else {
                debug!(path = %self.path.display(), "Database disconnected");
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the open connection, for maintenance commands (VACUUM, integrity check).
    pub fn connection(&self) -> AppResult<&Connection> {
        self.conn.as_ref().ok_or(AppError::NotConnected)
    }

    /// Insert `component`; its id (if any) is ignored. Returns the assigned id.
    pub fn add_component(&self, component: &Component) -> AppResult<i64> {
        let conn = self.connection()?;
        let id = queries::insert_component(conn, component)?;

        debug!(id, name = %component.name, "Inserted component");
        ttlog_best_effort(conn, "add", &id.to_string(), &component.name);
        Ok(id)
    }

    /// Overwrite name, type, quantity, location and purchase date of the row
    /// with `component.id`.
    ///
    /// `Ok(false)` means no row has that id: a no-op, not a failure.
    pub fn update_component(&self, component: &Component) -> AppResult<bool> {
        let conn = self.connection()?;
        let id = component.id.ok_or(AppError::MissingId)?;

        let changed = queries::update_component(conn, id, component)? > 0;

        debug!(id, changed, "Updated component");
        if changed {
            ttlog_best_effort(conn, "edit", &id.to_string(), &component.name);
        }
        Ok(changed)
    }

    /// Remove the row with `id`. `Ok(false)` when it did not exist.
    pub fn delete_component(&self, id: i64) -> AppResult<bool> {
        let conn = self.connection()?;
        let removed = queries::delete_component(conn, id)? > 0;

        debug!(id, removed, "Deleted component");
        if removed {
            ttlog_best_effort(conn, "del", &id.to_string(), "Component deleted");
        }
        Ok(removed)
    }

    pub fn get_component(&self, id: i64) -> AppResult<Option<Component>> {
        queries::load_component(self.connection()?, id)
    }

    /// All components, by name ascending.
    pub fn get_all_components(&self) -> AppResult<Vec<Component>> {
        queries::load_all_components(self.connection()?)
    }

    /// Components whose name, type or location contains `keyword`, by name.
    pub fn search_components(&self, keyword: &str) -> AppResult<Vec<Component>> {
        debug!(keyword, "Searching components");
        let found = queries::search_components(self.connection()?, keyword)?;
        debug!(count = found.len(), "Search returned components");
        Ok(found)
    }

    /// Components with `quantity <= threshold`, by quantity ascending.
    pub fn get_low_stock_components(&self, threshold: i32) -> AppResult<Vec<Component>> {
        queries::load_low_stock(self.connection()?, threshold)
    }

    pub fn get_component_count(&self) -> AppResult<i64> {
        queries::count_components(self.connection()?)
    }

    /// Distinct component types, ascending.
    pub fn get_component_types(&self) -> AppResult<Vec<String>> {
        queries::load_types(self.connection()?)
    }

    /// Drop and rebuild the table from the canonical schema, reinserting
    /// every row. Ids are reassigned. Not atomic; see
    /// [`recreate_components_table`].
    pub fn recreate_table(&self) -> AppResult<usize> {
        let conn = self.connection()?;
        let rows = recreate_components_table(conn)?;
        ttlog_best_effort(
            conn,
            "schema_repair",
            "components",
            &format!("Table recreated, {} rows reinserted", rows),
        );
        Ok(rows)
    }
}

impl Drop for DatabaseManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_fail_while_disconnected() {
        let db = DatabaseManager::new();
        assert!(!db.is_connected());
        assert!(matches!(db.get_component_count(), Err(AppError::NotConnected)));
        assert!(matches!(
            db.add_component(&Component::new("X", "Y", 1, None, None)),
            Err(AppError::NotConnected)
        ));
        assert!(matches!(db.get_component(1), Err(AppError::NotConnected)));
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mut db = DatabaseManager::new();
        db.disconnect();
        db.disconnect();
        assert!(!db.is_connected());
    }

    #[test]
    fn connect_failure_leaves_manager_disconnected() {
        let mut db = DatabaseManager::new();
        let bad = std::env::temp_dir()
            .join("rinventory_no_such_dir")
            .join("nested")
            .join("inventory.db");
        assert!(db.connect(Some(&bad)).is_err());
        assert!(!db.is_connected());
        assert_eq!(db.path(), Path::new(DEFAULT_DB_FILE));
    }
}
