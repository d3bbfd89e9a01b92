//! Tracing/logging setup shared by the API binary and workers.
//!
//! Denied requests are logged with their *specific* internal reason here
//! even though clients only ever see the generic one; the structured log
//! stream is the audit trail for authentication and authorization decisions.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing (JSON lines, `RUST_LOG`-filterable).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
