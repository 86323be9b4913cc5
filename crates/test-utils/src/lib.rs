pub mod capture;
pub mod fixtures;

use std::sync::Once;

use confbox::logging::LOG_ENV_VAR;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route test logs through the harness's captured output.
///
/// Reads the same `CONFBOX_LOG` directives as the binary, defaulting to
/// `confbox=debug` so loader events show up next to a failing assertion.
/// Loaders built by `capture::capturing_loader` keep their own dispatcher
/// and are unaffected.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("confbox=debug"));

        // Another harness may have installed a subscriber already.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
