//! Log output for the CLI.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "NLS_LOG";

/// Initialize tracing from `NLS_LOG`, or `RUST_LOG` when that is unset.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `NLS_LOG=nls_parse=debug` or `NLS_LOG=nls_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let filter = if std::env::var(LOG_ENV).is_ok() {
            EnvFilter::from_env(LOG_ENV)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(
                HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_indent_lines(true),
            )
            .init();
    });
}
