// src/infrastructure/logging.rs
//
// Logging bootstrap
//
// The crate logs through the `log` facade; tracing-subscriber is the
// backend and bridges `log` records. RUST_LOG always wins over the
// verbosity flag.

use tracing_subscriber::EnvFilter;

/// Default directive for a `-v` count
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "cardfold=debug,info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(verbosity > 0)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
