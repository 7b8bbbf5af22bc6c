//! Tracing setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `filter` uses `EnvFilter` syntax
/// (`"info"`, `"server=debug,tower_http=info"`); an unparseable value falls
/// back to `info`.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, generate-types) is harmless
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}
