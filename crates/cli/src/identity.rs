//! Node identity discovery.
//!
//! Planning is always relative to the node the command runs on; `--node`
//! overrides discovery for tests and remote planning. The kernel hostname
//! is authoritative, with the `HOSTNAME` environment variable as the
//! fallback for environments without procfs.

use std::env;
use std::fs;

pub(crate) fn discover() -> Option<String> {
    if let Ok(raw) = fs::read_to_string("/proc/sys/kernel/hostname") {
        let name = raw.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    env::var("HOSTNAME")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|name| !name.is_empty())
}
