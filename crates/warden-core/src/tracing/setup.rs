//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Filter applied when `WARDEN_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warden_core=info,warden_rules=info,warden_store=info";

/// Initialize the Warden tracing/logging system.
///
/// Reads `WARDEN_LOG` for per-crate log levels, e.g.
/// `WARDEN_LOG=warden_rules=debug,warden_store=info`.
///
/// Idempotent; a subscriber installed elsewhere first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

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
