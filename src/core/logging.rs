//! Logging Setup
//!
//! Installs a `tracing` subscriber for the library's `log` and `tracing`
//! output:
//! - `RUST_LOG` wins; otherwise the configured level applies
//! - human-readable output on stderr, or JSON lines when configured
//! - `log` records are forwarded into `tracing`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging.
///
/// Returns `false` when a global subscriber was already installed; calling
/// this more than once is harmless.
pub fn init(config: &LoggingConfig) -> bool {
    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.json).then(|| fmt::layer().with_target(true).with_writer(std::io::stderr));

    let installed = tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_ok();

    // Already set when the subscriber's own log bridge is enabled
    if let Err(e) = tracing_log::LogTracer::init() {
        log::trace!("LogTracer not installed: {}", e);
    }

    if installed {
        log::debug!("Logging initialized at level '{}'", config.level);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        let _ = init(&config);
        assert!(!init(&config));
    }
}
