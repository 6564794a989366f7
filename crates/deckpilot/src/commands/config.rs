use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());
    println!();

    let config = Config::load_or_default();
    let defaults = config.defaults.unwrap_or_default();

    print_value("defaults.theme", defaults.theme.as_deref(), "dark");
    print_value(
        "defaults.interval",
        defaults.interval.map(|i| i.to_string()).as_deref(),
        "5",
    );
    print_value("defaults.start_mode", defaults.start_mode.as_deref(), "first");
    Ok(())
}

fn print_value(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(v) => println!("  {} {}", format!("{key}:").bold(), v.cyan()),
        None => println!(
            "  {} {} {}",
            format!("{key}:").bold(),
            default.dimmed(),
            "(default)".dimmed()
        ),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {}",
        "Saved".green().bold(),
        key,
        value.cyan()
    );
    println!("  {}", path.display().to_string().dimmed());
    Ok(())
}
