//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Build the log filter.
///
/// A non-empty `RUST_LOG` directive wins, so it can lower output as well as
/// raise it. Otherwise `--verbose` picks `debug` over `info`.
pub fn build_filter(env_directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };

    match env_directive.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!("Ignoring invalid {}: {err}", EnvFilter::DEFAULT_ENV);
            EnvFilter::new(fallback)
        }),
        None => EnvFilter::new(fallback),
    }
}

/// Install the stderr subscriber.
pub fn init(verbose: bool) {
    let directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .init();
}
