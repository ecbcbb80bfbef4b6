//! CLI argument definitions for `dopingplot`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use doping_plot::config::ConfigOverrides;
use doping_plot::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Output format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// Interactive HTML page
    #[value(alias = "htm")]
    Html,
    /// Standalone SVG document
    Svg,
    /// Markdown summary and table
    #[value(alias = "md")]
    Markdown,
}

impl From<FormatArg> for doping_plot::core::report::ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => Self::Html,
            FormatArg::Svg => Self::Svg,
            FormatArg::Markdown => Self::Markdown,
        }
    }
}

/// Canvas sizes must be finite and non-negative, like `config set width`
fn parse_canvas_size(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("'{value}' is not a non-negative number of pixels")),
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `url`, `width`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render the scatterplot.
    ///
    /// Loads the cyclist dataset, lays out the chart and writes it in the requested format.
    Render {
        /// Dataset file path or URL (defaults to config `url`)
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// Output file path (defaults to `<reports_dir>/cyclists_scatterplot.<ext>`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Html)]
        format: FormatArg,

        /// Canvas width for this run
        #[arg(long, value_name = "PX", value_parser = parse_canvas_size)]
        width: Option<f64>,

        /// Canvas height for this run
        #[arg(long, value_name = "PX", value_parser = parse_canvas_size)]
        height: Option<f64>,

        /// Chart title for this run
        #[arg(long, value_name = "TEXT")]
        title: Option<String>,
    },
    /// Print dataset summary statistics.
    Summary {
        /// Dataset file path or URL (defaults to config `url`)
        #[arg(value_name = "SOURCE")]
        source: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "dopingplot",
    about = "Render the professional cycling doping scatterplot",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config dataset location
    #[arg(long = "dataset-url", value_name = "URL")]
    pub dataset_url: Option<String>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            dataset_url: self.dataset_url.clone(),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dopingplot").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["summary"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.dataset_url.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--dataset-url",
            "https://example.com/data.json",
            "--reports-dir",
            "/output",
            "summary",
        ]);
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("debug"));
        assert_eq!(overrides.file.as_deref(), Some("/tmp/test.log"));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(
            overrides.dataset_url.as_deref(),
            Some("https://example.com/data.json")
        );
        assert_eq!(overrides.reports_dir.as_deref(), Some("/output"));
    }

    #[test]
    fn test_render_defaults_to_html() {
        match parse(&["render", "data.json"]).command {
            Command::Render {
                source,
                format,
                output,
                ..
            } => {
                assert_eq!(source.as_deref(), Some("data.json"));
                assert_eq!(format, FormatArg::Html);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_format_alias() {
        match parse(&["render", "-f", "md", "--width", "1200"]).command {
            Command::Render { format, width, .. } => {
                assert_eq!(format, FormatArg::Markdown);
                assert_eq!(width, Some(1200.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_rejects_unusable_canvas_sizes() {
        for bad in ["NaN", "inf", "-5", "wide"] {
            let result =
                Cli::try_parse_from(["dopingplot", "render", "--width", bad, "data.json"]);
            assert!(result.is_err(), "width {bad} should be rejected");
        }
        assert!(Cli::try_parse_from(["dopingplot", "render", "--height", "NaN"]).is_err());
    }
}
