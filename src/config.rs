use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What the binary prints for a loaded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Rendered shell text.
    #[default]
    Script,
    /// Structural debug text.
    Describe,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default)]
    pub trailing_newline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Log file path, `~` expanded on use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    output: OutputOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct OutputOverlay {
    mode: Option<OutputMode>,
    trailing_newline: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<LogLevel>,
    file: Option<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/shcompose/config.toml (if exists)
    ///
    /// Values present in the overlay replace the defaults; absent ones are kept.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/shcompose/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/shcompose/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("shcompose: config parse error: {e}");
                None
            }
        }
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let o = overlay.output;
        if let Some(v) = o.mode {
            self.output.mode = v;
        }
        if let Some(v) = o.trailing_newline {
            self.output.trailing_newline = v;
        }

        let l = overlay.logging;
        if let Some(v) = l.level {
            self.logging.level = v;
        }
        if let Some(v) = l.file {
            self.logging.file = Some(v);
        }
    }

    /// The configured log file with `~` and `$VAR` expanded.
    pub fn log_file(&self) -> Option<std::path::PathBuf> {
        let raw = self.logging.file.as_deref()?;
        let expanded = shellexpand::full(raw).unwrap_or(std::borrow::Cow::Borrowed(raw));
        Some(std::path::PathBuf::from(expanded.as_ref()))
    }

    /// Render the merged configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert_eq!(config.output.mode, OutputMode::Script);
        assert!(config.output.trailing_newline);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn overlay_overrides_mode() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [output]
            mode = "describe"
        "#,
        );
        assert_eq!(config.output.mode, OutputMode::Describe);
        // Unmentioned values keep their defaults
        assert!(config.output.trailing_newline);
    }

    #[test]
    fn overlay_sets_logging() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [logging]
            level = "debug"
            file = "/tmp/shcompose.log"
        "#,
        );
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.log_file(),
            Some(std::path::PathBuf::from("/tmp/shcompose.log"))
        );
    }

    #[test]
    fn log_file_expands_tilde() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [logging]
            file = "~/shcompose.log"
        "#,
        );
        let path = config.log_file().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("shcompose.log"));
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.output.mode, OutputMode::Script);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn level_filters() {
        assert_eq!(LogLevel::Off.to_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Trace.to_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn dump_round_trips() {
        let config = Config::default_config();
        let dumped = config.to_toml().unwrap();
        let reparsed: Config = toml::from_str(&dumped).unwrap();
        assert_eq!(reparsed.output.mode, config.output.mode);
        assert_eq!(reparsed.logging.level, config.logging.level);
    }
}
