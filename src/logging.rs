use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Safe to call more than once.
///
/// `RUST_LOG` is honored only when `debug` is set; otherwise the level is
/// pinned to `info`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
