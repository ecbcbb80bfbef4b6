//! Integration tests for configuration management

use doping_plot::config::{Config, ConfigOverrides, CONFIG_KEYS};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        config.dataset.url.starts_with("https://"),
        "Default dataset should be the published cyclist data"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert_eq!(config.chart.title, "Doping in Professional Bicycle Racing");
    assert!((config.chart.margin_top - 100.0).abs() < f64::EPSILON);
    assert!((config.chart.margin_left - 80.0).abs() < f64::EPSILON);
    assert_eq!(config.chart.doping_color, "blue");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[dataset]
url = "./data/cyclists.json"

[paths]
reports_dir = "./reports"

[chart]
title = "Alpe d'Huez"
width = 1200.0
dot_radius = 4.0
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.dataset.url, "./data/cyclists.json");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.chart.title, "Alpe d'Huez");
    assert!((config.chart.width - 1200.0).abs() < f64::EPSILON);
    assert!((config.chart.dot_radius - 4.0).abs() < f64::EPSILON);
    // Unlisted chart fields keep their built-in defaults
    assert!((config.chart.height - 600.0).abs() < f64::EPSILON);
    assert_eq!(config.chart.clean_color, "orange");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.dataset.url, "");
    assert_eq!(config.chart.x_ticks, 10);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$DOPING_PLOT/test.log"

[paths]
reports_dir = "$DOPING_PLOT/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("dopingplot"));
    assert!(!config.logging.file.contains("$DOPING_PLOT"));
    assert!(config.paths.reports_dir.ends_with("reports"));
    assert!(!config.paths.reports_dir.contains("$DOPING_PLOT"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config
        .set("url", "https://example.com/cyclists.json")
        .expect("Failed to set url");
    assert_eq!(
        config.get("dataset-url").unwrap(),
        "https://example.com/cyclists.json"
    );

    config.set("height", "720").expect("Failed to set height");
    assert_eq!(config.get("height").unwrap(), "720");

    config
        .set("clean_color", "#f90")
        .expect("Failed to set clean_color");
    assert_eq!(config.chart.clean_color, "#f90");

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("width", "400").expect("Failed to set width");
    config.set("title", "Other").expect("Failed to set title");

    for key in ["level", "width", "title"] {
        config
            .unset(key, &defaults)
            .unwrap_or_else(|e| panic!("Failed to unset {key}: {e}"));
    }

    assert_eq!(config.logging.level, defaults.logging.level);
    assert!((config.chart.width - defaults.chart.width).abs() < f64::EPSILON);
    assert_eq!(config.chart.title, defaults.chart.title);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_every_key_unsets_to_default() {
    let defaults = Config::from_defaults();
    let mut config = Config::from_defaults();
    for key in CONFIG_KEYS {
        config
            .unset(key, &defaults)
            .unwrap_or_else(|e| panic!("Failed to unset {key}: {e}"));
        assert_eq!(config.get(key), defaults.get(key), "key {key}");
    }
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("dot_radius", "7.5").expect("Failed to set radius");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert!((loaded.chart.dot_radius - 7.5).abs() < f64::EPSILON);
    assert_eq!(loaded.dataset.url, config.dataset.url);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        dataset_url: Some("./local.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.dataset.url, "./local.json");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.dataset.url, defaults.dataset.url);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[dataset]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[chart]"));
    assert!(display_str.contains("margin_left = 80"));
    assert!(display_str.contains("tooltip_offset = 20"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.dataset.url.is_empty());
    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.dataset.url, defaults.dataset.url);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[dataset]
url = "./mine.json"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.dataset.url, "./mine.json");
}

#[test]
fn test_get_dopingplot_dir() {
    let dir = Config::get_dopingplot_dir();
    assert!(dir.to_string_lossy().contains("dopingplot"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
