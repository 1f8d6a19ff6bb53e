pub mod backup;
pub mod inventory;
pub mod log;

pub use inventory::InventoryManager;
