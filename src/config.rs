//! Configuration module for `dopingplot`

use crate::core::chart::ChartStyle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory
const DIR_VARIABLE: &str = "$DOPING_PLOT";

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "url",
    "reports_dir",
    "title",
    "width",
    "height",
    "margin_top",
    "margin_right",
    "margin_bottom",
    "margin_left",
    "dot_radius",
    "doping_color",
    "clean_color",
    "legend_item_width",
    "swatch_size",
    "swatch_spacing",
    "tooltip_width",
    "tooltip_height",
    "tooltip_offset",
    "x_ticks",
    "y_ticks",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Dataset configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Default dataset location (URL or file path)
    #[serde(default)]
    pub url: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for rendered charts
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dataset settings
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Chart layout settings
    #[serde(default)]
    pub chart: ChartStyle,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override dataset location
    pub dataset_url: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$DOPING_PLOT` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/dopingplot`
    /// - macOS: `~/Library/Application Support/dopingplot`
    /// - Windows: `%APPDATA%\dopingplot`
    #[must_use]
    pub fn get_dopingplot_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dopingplot")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// String settings that are empty here and non-empty in `defaults` are
    /// copied over, so upgrading adds new settings without touching the
    /// user's values. Chart settings are filled per field by serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        let mut fill = |value: &mut String, default: &String| {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        };

        fill(&mut self.logging.level, &defaults.logging.level);
        fill(&mut self.logging.file, &defaults.logging.file);
        fill(&mut self.dataset.url, &defaults.dataset.url);
        fill(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        fill(&mut self.chart.title, &defaults.chart.title);
        fill(&mut self.chart.doping_color, &defaults.chart.doping_color);
        fill(&mut self.chart.clean_color, &defaults.chart.clean_color);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the config file is not modified.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(url) = &overrides.dataset_url {
            self.dataset.url.clone_from(url);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_dopingplot_dir`](Self::get_dopingplot_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_dopingplot_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$DOPING_PLOT` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_dopingplot_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults. `$DOPING_PLOT` is expanded in
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.dataset.url = Self::expand_variables(&config.dataset.url);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in defaults TOML cannot be parsed
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults, save if anything was added
    /// - On first run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()))
        {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(e) => {
                crate::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Keys are listed in [`CONFIG_KEYS`]; `-` and `_` are interchangeable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let chart = &self.chart;
        let value = match normalize_key(key).as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "url" | "dataset_url" => self.dataset.url.clone(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "title" => chart.title.clone(),
            "width" => chart.width.to_string(),
            "height" => chart.height.to_string(),
            "margin_top" => chart.margin_top.to_string(),
            "margin_right" => chart.margin_right.to_string(),
            "margin_bottom" => chart.margin_bottom.to_string(),
            "margin_left" => chart.margin_left.to_string(),
            "dot_radius" => chart.dot_radius.to_string(),
            "doping_color" => chart.doping_color.clone(),
            "clean_color" => chart.clean_color.clone(),
            "legend_item_width" => chart.legend_item_width.to_string(),
            "swatch_size" => chart.swatch_size.to_string(),
            "swatch_spacing" => chart.swatch_spacing.to_string(),
            "tooltip_width" => chart.tooltip_width.to_string(),
            "tooltip_height" => chart.tooltip_height.to_string(),
            "tooltip_offset" => chart.tooltip_offset.to_string(),
            "x_ticks" => chart.x_ticks.to_string(),
            "y_ticks" => chart.y_ticks.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse for that key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = normalize_key(key);
        let chart = &mut self.chart;
        match key.as_str() {
            "level" => {
                value.parse::<crate::logger::Level>()?;
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "url" | "dataset_url" => self.dataset.url = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "title" => chart.title = value.to_string(),
            "width" => chart.width = parse_dimension(&key, value)?,
            "height" => chart.height = parse_dimension(&key, value)?,
            "margin_top" => chart.margin_top = parse_dimension(&key, value)?,
            "margin_right" => chart.margin_right = parse_dimension(&key, value)?,
            "margin_bottom" => chart.margin_bottom = parse_dimension(&key, value)?,
            "margin_left" => chart.margin_left = parse_dimension(&key, value)?,
            "dot_radius" => chart.dot_radius = parse_dimension(&key, value)?,
            "doping_color" => chart.doping_color = value.to_string(),
            "clean_color" => chart.clean_color = value.to_string(),
            "legend_item_width" => chart.legend_item_width = parse_dimension(&key, value)?,
            "swatch_size" => chart.swatch_size = parse_dimension(&key, value)?,
            "swatch_spacing" => chart.swatch_spacing = parse_dimension(&key, value)?,
            "tooltip_width" => chart.tooltip_width = parse_dimension(&key, value)?,
            "tooltip_height" => chart.tooltip_height = parse_dimension(&key, value)?,
            "tooltip_offset" => chart.tooltip_offset = parse_dimension(&key, value)?,
            "x_ticks" => chart.x_ticks = parse_count(&key, value)?,
            "y_ticks" => chart.y_ticks = parse_count(&key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let key = normalize_key(key);
        if !CONFIG_KEYS.contains(&key.as_str()) && key != "dataset_url" {
            return Err(format!("Unknown config key: '{key}'"));
        }
        let default = defaults
            .get(&key)
            .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
        self.set(&key, &default)
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, so the next [`load()`](Config::load)
    /// recreates it from defaults. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('-', "_")
}

fn parse_dimension(key: &str, value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!(
            "Invalid value for '{key}': '{value}' (expected a non-negative number)"
        )),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!(
            "Invalid value for '{key}': '{value}' (expected a positive integer)"
        )),
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[dataset]")?;
        writeln!(f, "  url = \"{}\"", self.dataset.url)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[chart]")?;
        for key in CONFIG_KEYS.iter().skip(5) {
            if let Some(value) = self.get(key) {
                writeln!(f, "  {key} = {value}")?;
            }
        }

        Ok(())
    }
}
