//! Log initialization for the frontend.
//!
//! Repeated `-v` flags pick the default level; the `OC_SYNC_LOG`
//! environment variable takes precedence and accepts any
//! tracing-subscriber filter directive (for example
//! `OC_SYNC_LOG=oc_sync::plan=trace`). Events go to stderr so command
//! output on stdout stays clean.

use std::io;

use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "OC_SYNC_LOG";

pub(crate) fn init(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init: a second subscriber in the same process is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
