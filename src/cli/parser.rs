use clap::{Parser, Subcommand};

/// Command-line interface definition for rInventory
/// CLI application to track electronic components with SQLite
#[derive(Parser)]
#[command(
    name = "rinventory",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple inventory CLI: track components, stock levels and locations using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the current configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (integrity checks, repair, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "repair",
            help = "Rebuild the components table from the canonical schema (ids are reassigned)"
        )]
        repair: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a new component
    Add {
        /// Component name
        name: String,

        /// Component type (Resistor, Capacitor, IC, ...)
        #[arg(value_name = "TYPE")]
        kind: String,

        #[arg(long = "qty", default_value_t = 0, help = "Quantity in stock")]
        quantity: i32,

        #[arg(long = "loc", help = "Storage location")]
        location: Option<String>,

        #[arg(long = "date", help = "Purchase date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Update fields of an existing component
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long = "qty", help = "New quantity")]
        quantity: Option<i32>,

        #[arg(long = "loc", help = "New location (empty string clears it)")]
        location: Option<String>,

        #[arg(long = "date", help = "New purchase date (YYYY-MM-DD, empty clears it)")]
        date: Option<String>,
    },

    /// Delete a component by ID
    Del { id: i64 },

    /// Show one component
    Show { id: i64 },

    /// List all components (by name)
    List {
        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Search name, type and location
    Search {
        keyword: String,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// List components at or below the low-stock threshold
    Low {
        #[arg(long, short, help = "Threshold (default: from configuration)")]
        threshold: Option<i32>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// List distinct component types
    Types,

    /// Print the number of stored components
    Count,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup file")]
        force: bool,
    },
}
