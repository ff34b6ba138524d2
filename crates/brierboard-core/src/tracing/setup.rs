//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "BRIERBOARD_LOG";

/// Initialize logging for brierboard.
///
/// Reads `BRIERBOARD_LOG` for per-crate levels, e.g.
/// `BRIERBOARD_LOG=brierboard_engine::simulation=debug,brierboard=info`.
/// Falls back to `brierboard=info` when unset or invalid.
///
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("brierboard=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
