//! Tracing subscriber setup.
//!
//! Console output respects RUST_LOG (e.g. `RUST_LOG=hostsman=debug`).
//! Without it, warnings only, or debug with `--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the stderr subscriber. Safe to call once per process.
pub fn init(verbose: bool) {
    let default = if verbose { "hostsman=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
