//! rInventory main entrypoint.

use rinventory::run;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; RINVENTORY_LOG=debug to see store activity.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RINVENTORY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
