//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Regrade tracing/logging system.
///
/// Reads the `REGRADE_LOG` environment variable for per-crate log levels.
/// Format: `REGRADE_LOG=regrade_analysis=debug,regrade_core=warn`
///
/// Falls back to `regrade=info` if `REGRADE_LOG` is unset or invalid.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("REGRADE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("regrade=info"));

        // Another subscriber may already be installed by the host process.
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
