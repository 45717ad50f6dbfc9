// VgeViewer - platform/config.rs
//
// Platform config directory resolution and read-only config.toml loading
// with startup validation. The file is never written by the application.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/vgeviewer/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so an older binary accepts a newer file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[plot]` section.
    pub plot: PlotSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[plot]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PlotSection {
    /// Window x position in pixels.
    pub window_x: Option<f32>,
    /// Window y position in pixels.
    pub window_y: Option<f32>,
    /// Row count from which markers are dropped.
    pub marker_row_threshold: Option<usize>,
    /// Tick label size in points.
    pub tick_label_size: Option<f32>,
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Screen position of every figure window.
    pub window_pos: (f32, f32),
    /// Row count from which markers are dropped.
    pub marker_row_threshold: usize,
    /// Tick label size in points.
    pub tick_label_size: f32,
    /// Dark (true) or light (false) visuals.
    pub dark_mode: bool,
    /// Logging level string, applied before tracing is initialised.
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_pos: constants::DEFAULT_WINDOW_POS,
            marker_row_threshold: constants::DEFAULT_MARKER_ROW_THRESHOLD,
            tick_label_size: constants::DEFAULT_TICK_LABEL_SIZE,
            dark_mode: false,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns the validated config and a list of non-fatal warnings. A missing
/// file yields defaults with no warnings; an unreadable or unparseable file
/// yields defaults with one warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path,
                source: e,
            };
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    match parse_config(&content, &config_path) {
        Ok(result) => {
            tracing::debug!(path = %config_path.display(), "Loaded config.toml");
            result
        }
        Err(err) => (AppConfig::default(), vec![format!("{err}. Using defaults.")]),
    }
}

/// Parse and validate config text. Out-of-range values become warnings and
/// keep their defaults.
pub fn parse_config(
    content: &str,
    path: &Path,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();
    let mut out_of_range = |field: &str, value: String, expected: String| {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value,
                expected,
            }
            .to_string(),
        );
    };

    // -- Plot: window position --
    let coord_range = 0.0..=constants::MAX_WINDOW_COORD;
    if let Some(x) = raw.plot.window_x {
        if coord_range.contains(&x) {
            config.window_pos.0 = x;
        } else {
            out_of_range(
                "plot.window_x",
                x.to_string(),
                format!("0-{}", constants::MAX_WINDOW_COORD),
            );
        }
    }
    if let Some(y) = raw.plot.window_y {
        if coord_range.contains(&y) {
            config.window_pos.1 = y;
        } else {
            out_of_range(
                "plot.window_y",
                y.to_string(),
                format!("0-{}", constants::MAX_WINDOW_COORD),
            );
        }
    }

    // -- Plot: marker threshold --
    if let Some(n) = raw.plot.marker_row_threshold {
        if (1..=constants::MAX_MARKER_ROW_THRESHOLD).contains(&n) {
            config.marker_row_threshold = n;
        } else {
            out_of_range(
                "plot.marker_row_threshold",
                n.to_string(),
                format!("1-{}", constants::MAX_MARKER_ROW_THRESHOLD),
            );
        }
    }

    // -- Plot: tick label size --
    if let Some(size) = raw.plot.tick_label_size {
        if (constants::MIN_TICK_LABEL_SIZE..=constants::MAX_TICK_LABEL_SIZE).contains(&size) {
            config.tick_label_size = size;
        } else {
            out_of_range(
                "plot.tick_label_size",
                size.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_TICK_LABEL_SIZE,
                    constants::MAX_TICK_LABEL_SIZE
                ),
            );
        }
    }

    // -- Plot: theme --
    if let Some(ref theme) = raw.plot.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => out_of_range(
                "plot.theme",
                other.to_string(),
                "\"dark\" or \"light\"".to_string(),
            ),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            out_of_range(
                "logging.level",
                level.clone(),
                "error, warn, info, debug, trace".to_string(),
            );
        }
    }

    Ok((config, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("config.toml")).unwrap()
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values_applied() {
        let (config, warnings) = parse(
            "[plot]\nwindow_x = 100.0\nwindow_y = 20.0\nmarker_row_threshold = 500\n\
             tick_label_size = 12.0\ntheme = \"Dark\"\n[logging]\nlevel = \"DEBUG\"\n",
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.window_pos, (100.0, 20.0));
        assert_eq!(config.marker_row_threshold, 500);
        assert_eq!(config.tick_label_size, 12.0);
        assert!(config.dark_mode);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_keep_default() {
        let (config, warnings) = parse("[plot]\nmarker_row_threshold = 0\ntick_label_size = 99.0\n");
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.marker_row_threshold, constants::DEFAULT_MARKER_ROW_THRESHOLD);
        assert_eq!(config.tick_label_size, constants::DEFAULT_TICK_LABEL_SIZE);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_, warnings) = parse("[future]\nanything = 1\n[plot]\nnew_knob = true\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = parse_config("[plot\n", Path::new("config.toml"));
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_broken_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "= nope").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }
}
