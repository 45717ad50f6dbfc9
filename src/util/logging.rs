// VgeViewer - util/logging.rs
//
// tracing subscriber setup for the vgeviewer binary. Log lines go to
// stderr in compact form so they never mix with the diagnostics and
// [Warning]/[Error] lines on stdout. The filter comes from, in order:
// RUST_LOG, --debug, the config file's [logging] level, then "warn".

use super::constants;
use tracing_subscriber::EnvFilter;

/// Filter directive used when RUST_LOG is not set.
fn fallback_directive(debug_flag: bool, config_level: Option<&str>) -> &str {
    if debug_flag {
        "debug"
    } else {
        config_level.unwrap_or(constants::DEFAULT_LOG_LEVEL)
    }
}

/// Install the global subscriber. Call once, after the config is read.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(fallback_directive(debug_flag, config_level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        "Logging initialised"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_beats_config_level() {
        assert_eq!(fallback_directive(true, Some("error")), "debug");
        assert_eq!(fallback_directive(false, Some("info")), "info");
        assert_eq!(fallback_directive(false, None), constants::DEFAULT_LOG_LEVEL);
    }
}
