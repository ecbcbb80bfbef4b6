//! Config command handler

use crate::args::ConfigSubcommand;
use doping_plot::config::{Config, CONFIG_KEYS};
use doping_plot::info;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a printable message when a key is unknown, a value is invalid, or the file cannot be written
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_one(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value).map_err(|e| format!("✗ {e}"))?;
            persist(config)?;
            info!("Config updated: {key} = {value}");
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults).map_err(|e| format!("✗ {e}"))?;
            persist(config)?;
            info!("Config reset: {key}");
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
    println!("\n(file: {})", Config::get_config_file_path().display());
}

fn show_one(config: &Config, key: &str) -> Result<(), String> {
    let value = config.get(key).ok_or_else(|| {
        format!(
            "✗ Unknown config key: '{key}'\n  Known keys: {}",
            CONFIG_KEYS.join(", ")
        )
    })?;
    println!("{value}");
    Ok(())
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

/// Delete the config file after a `y`/`yes` answer read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if is_confirmation(&response) {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn is_confirmation(response: &str) -> bool {
    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
