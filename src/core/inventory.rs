//! In-memory facade over [`DatabaseManager`].
//!
//! Every successful mutation reloads the whole name-ordered list from the
//! store; reads are served from that list. The list goes stale only when
//! something else writes to the database file directly.
//!
//! Mutations report plain success/failure: storage errors are logged with
//! `tracing` and turned into `false`. A mutation only counts as successful
//! when the reload after it succeeds too, so a `true` result always leaves
//! the list consistent with the store.

use crate::db::DatabaseManager;
use crate::errors::AppResult;
use crate::models::{Component, DEFAULT_LOW_STOCK_THRESHOLD};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct InventoryManager {
    db: DatabaseManager,
    components: Vec<Component>,
}

impl InventoryManager {
    /// Wrap an existing manager and load its content (empty if disconnected).
    pub fn new(db: DatabaseManager) -> Self {
        let mut inv = Self {
            db,
            components: Vec::new(),
        };
        inv.reload();
        inv
    }

    /// Connect to `path` and load its content.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let mut db = DatabaseManager::with_path(path.as_ref());
        db.connect(None)?;
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    /// Replace the local list with the store's content.
    /// Returns false (and keeps the old list) when the store cannot be read.
    pub fn reload(&mut self) -> bool {
        if !self.db.is_connected() {
            self.components.clear();
            return false;
        }

        match self.db.get_all_components() {
            Ok(all) => {
                debug!(count = all.len(), "Inventory reloaded");
                self.components = all;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to reload inventory");
                false
            }
        }
    }

    /// Insert and refresh. Returns the assigned id, or None on failure.
    ///
    /// None is also returned when the row was stored but the list could not
    /// be reloaded; the row is then only visible through [`Self::database`].
    pub fn add_component(&mut self, component: &Component) -> Option<i64> {
        match self.db.add_component(component) {
            Ok(id) => self.reload().then_some(id),
            Err(e) => {
                warn!(name = %component.name, error = %e, "Failed to add component");
                None
            }
        }
    }

    /// Update and refresh. A missing id counts as success (nothing to change).
    pub fn update_component(&mut self, component: &Component) -> bool {
        match self.db.update_component(component) {
            Ok(_) => self.reload(),
            Err(e) => {
                warn!(id = ?component.id, error = %e, "Failed to update component");
                false
            }
        }
    }

    /// Delete and refresh. Deleting an unknown id counts as success.
    pub fn delete_component(&mut self, id: i64) -> bool {
        match self.db.delete_component(id) {
            Ok(_) => self.reload(),
            Err(e) => {
                warn!(id, error = %e, "Failed to delete component");
                false
            }
        }
    }

    /// Rebuild the table and refresh. Ids change, so callers holding ids
    /// must look them up again.
    pub fn recreate_table(&mut self) -> bool {
        match self.db.recreate_table() {
            Ok(_) => self.reload(),
            Err(e) => {
                warn!(error = %e, "Failed to recreate components table");
                false
            }
        }
    }

    /// Cached list, name ascending.
    pub fn get_all_components(&self) -> &[Component] {
        &self.components
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn find_component_by_id(&self, id: i64) -> Option<&Component> {
        self.components.iter().find(|c| c.id == Some(id))
    }

    pub fn find_components_by_name(&self, name: &str) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.name.contains(name))
            .collect()
    }

    pub fn find_components_by_type(&self, kind: &str) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.kind.contains(kind))
            .collect()
    }

    pub fn find_components_by_location(&self, location: &str) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.location_str().contains(location))
            .collect()
    }

    /// Substring match on name, type or location; same rule as the store's
    /// search, served from the cache.
    pub fn search_components(&self, keyword: &str) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| {
                c.name.contains(keyword)
                    || c.kind.contains(keyword)
                    || c.location.as_deref().is_some_and(|l| l.contains(keyword))
            })
            .collect()
    }

    /// Cached components at or below `threshold`, quantity ascending
    /// (name breaks ties, as the cache is name-ordered and the sort is stable).
    pub fn low_stock_components(&self, threshold: i32) -> Vec<&Component> {
        let mut low: Vec<&Component> = self
            .components
            .iter()
            .filter(|c| c.is_low_stock(threshold))
            .collect();
        low.sort_by_key(|c| c.quantity);
        low
    }

    pub fn low_stock_default(&self) -> Vec<&Component> {
        self.low_stock_components(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Distinct types from the cache, ascending.
    pub fn component_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.components.iter().map(|c| c.kind.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        types
    }
}
