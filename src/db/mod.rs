pub mod log;
pub mod manager;
pub mod migrate;
pub mod queries;
pub mod schema;
pub mod stats;

pub use manager::{DEFAULT_DB_FILE, DatabaseManager};
