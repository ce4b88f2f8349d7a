//! Diagnostics for `updater` runs.
//!
//! Events go to stderr so they never mix with the record document on stdout.
//! The core never logs. The io and orchestration layers emit:
//!
//! - `debug`: config and records loaded, output written, matched positions.
//! - `warn`: no record matched the id, or records lack the id field.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// `RUST_LOG` selects the filter; unset means `warn`, which still reports an
/// unmatched id.
///
/// ```bash
/// RUST_LOG=updater=debug updater apply --input items.json --id 2 --inc value=5
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time().compact())
        .init();
}
