use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Install a global `fmt` subscriber filtered by `config.log_filter`.
/// Returns false if a global subscriber was already set.
///
/// `Config::from_env` has already rejected malformed filters; directives
/// that still fail to parse here are skipped.
pub fn init_tracing(config: &Config) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_only_once() {
        let config = Config {
            log_filter: "maintrack=debug".to_string(),
            ..Config::default()
        };

        // The first call may lose the race to another test's subscriber;
        // a second call always finds one installed.
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
