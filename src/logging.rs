//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout to command
//! output. The audit trail of writes lives in the `log` table instead
//! (see `db::log`).

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` overrides `level`; repeated
/// calls are no-ops.
pub fn init(level: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("rbooking={level}")));

        // Another subscriber may already be installed (e.g. by a host app).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
