//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the regshift tracing/logging system.
///
/// Reads `REGSHIFT_LOG` for per-module log levels, e.g.
/// `REGSHIFT_LOG=regshift_analysis::events=debug,regshift_analysis::coverage=info`.
/// Falls back to `regshift=info` if unset or invalid.
///
/// Idempotent. Output goes to stderr so JSON reports on stdout stay clean.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("regshift=info"));

        // Another subscriber may already be installed by an embedding binary.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
