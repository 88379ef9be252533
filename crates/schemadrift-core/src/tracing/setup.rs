//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "SCHEMADRIFT_LOG";

/// Initialize the schemadrift tracing/logging system.
///
/// Reads `SCHEMADRIFT_LOG` for per-subsystem log levels, e.g.
/// `SCHEMADRIFT_LOG=schemadrift_analysis::scanner=debug,schemadrift_analysis::impact=info`.
///
/// Falls back to `schemadrift=info` if the variable is unset or invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("schemadrift=info"));

        // A host may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
