use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV_VAR: &str = "TASKLIST_LOG";
const DEFAULT_DIRECTIVE: &str = "error";

/// Installs the stderr subscriber. Quiet unless `TASKLIST_LOG` asks for more,
/// e.g. `TASKLIST_LOG=tasklist_core=debug`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
