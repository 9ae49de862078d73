//! `tracing` subscriber setup for the command-line binary.

use tracing_subscriber::EnvFilter;

/// Filter directive for a given `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "grid_alloc=warn",
        1 => "grid_alloc=info",
        2 => "grid_alloc=debug",
        _ => "grid_alloc=trace",
    }
}

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity-derived default. Calling
/// this more than once leaves the first subscriber in place.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
