//! Diagnostic tracing for the inventory manager.
//!
//! Console output meant for the user goes to stdout through the UI layer.
//! Tracing events go to stderr and are silent unless `RUST_LOG` asks for
//! them, so they never interleave with the menu by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`.
///
/// # Example
/// ```bash
/// RUST_LOG=cd_inventory=debug cd-inventory --file ./CDInventory.dat
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
