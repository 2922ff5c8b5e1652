//! Configuration for the storefront shell
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/stall/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Catalog JSON file; the bundled sample set when absent
    pub catalog_path: Option<PathBuf>,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level for the stall target (RUST_LOG overrides)
    pub level: String,

    /// Write rolling log files; without this, TUI runs log nowhere
    pub file_enabled: bool,

    /// Directory for rolling log files
    pub file_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            catalog_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let file_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stall")
            .join("logs");
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir,
        }
    }
}

/// On-disk shape. Every field is optional so partial files merge cleanly
/// over the defaults.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    theme: Option<String>,
    catalog: Option<PathBuf>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<PathBuf>,
}

impl Config {
    /// Path of the config file, platform dependent.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stall").join("config.toml"))
    }

    /// Load configuration with the env > file > defaults precedence.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                        Ok(file) => config.apply_file(file),
                        Err(e) => {
                            eprintln!("Warning: ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        eprintln!("Warning: could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        if let Ok(theme) = std::env::var("STALL_THEME") {
            config.theme = theme;
        }
        if let Ok(path) = std::env::var("STALL_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Ok(level) = std::env::var("STALL_LOG") {
            config.logging.level = level;
        }

        config
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if let Some(catalog) = file.catalog {
            self.catalog_path = Some(catalog);
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(file_enabled) = logging.file_enabled {
                self.logging.file_enabled = file_enabled;
            }
            if let Some(file_dir) = logging.file_dir {
                self.logging.file_dir = file_dir;
            }
        }
    }

    /// Render the current values as a commented TOML document. Single
    /// source of truth for `config --reset` and the first-run template.
    pub fn to_toml(&self) -> String {
        let catalog = match &self.catalog_path {
            Some(path) => format!("catalog = {:?}", path.display().to_string()),
            None => "# catalog = \"/path/to/catalog.json\"".to_string(),
        };
        format!(
            r#"# stall configuration
# Values here are overridden by STALL_THEME, STALL_CATALOG and STALL_LOG.

# Theme: "dark" or "light"
theme = {theme:?}

# Product catalog JSON; omit to use the bundled sample set
{catalog}

[logging]
# Log level for the stall target (RUST_LOG overrides the whole filter)
level = {level:?}

# Write rolling log files (the TUI has nowhere else to log)
file_enabled = {file_enabled}
file_dir = {file_dir:?}
"#,
            theme = self.theme,
            catalog = catalog,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
        )
    }

    /// Write a default config template on first run so users can discover
    /// the options. Best effort: failure only warns.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
            eprintln!("Warning: could not write config template: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_merges_over_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            theme = "light"

            [logging]
            file_enabled = true
            "#,
        )
        .unwrap();

        let mut config = Config::default();
        config.apply_file(file);

        assert_eq!(config.theme, "light");
        assert!(config.logging.file_enabled);
        // Untouched fields keep their defaults.
        assert_eq!(config.logging.level, "info");
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn default_template_parses_back() {
        let rendered = Config::default().to_toml();
        let file: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(file.theme.as_deref(), Some("dark"));
        assert_eq!(file.logging.unwrap().file_enabled, Some(false));
    }

    #[test]
    fn catalog_path_round_trips_through_the_template() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/tmp/shop.json")),
            ..Config::default()
        };
        let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(file.catalog, Some(PathBuf::from("/tmp/shop.json")));
    }
}
