//! Log subscriber installation.

use tracing_subscriber::EnvFilter;

fn filter_or_info(filter: &str) -> EnvFilter {
    EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a human readable `tracing` subscriber.
///
/// `filter` uses `EnvFilter` directives (e.g. `storyflow=debug`); an invalid
/// directive falls back to `info`. Returns false if a global subscriber was
/// already installed, in which case nothing changes.
pub fn init_logging(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_or_info(filter))
        .try_init()
        .is_ok()
}

/// Installs a JSON `tracing` subscriber.
///
/// Same filter and re-installation rules as [`init_logging`].
pub fn init_json_logging(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter_or_info(filter))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_ignored() {
        let _ = init_logging("storyflow=debug");
        assert!(!init_logging("info"));
        assert!(!init_json_logging("not a [valid filter"));
    }
}
