//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::CoreConfig;

/// Default filter directive for a config
pub fn default_directive(config: &CoreConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "info"
    }
}

/// Install a fmt subscriber
///
/// `RUST_LOG` takes precedence; otherwise the level follows
/// `CoreConfig::debug`. Safe to call more than once: later calls are
/// ignored.
pub fn init_logging(config: &CoreConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    tracing::info!("Nebula bridge logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let mut config = CoreConfig::default();
        assert_eq!(default_directive(&config), "info");
        config.debug = true;
        assert_eq!(default_directive(&config), "debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = CoreConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
