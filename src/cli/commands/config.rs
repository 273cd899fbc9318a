//! `doc config` command handlers.

use anyhow::{Result, bail};

use crate::config::{
    ConfigFile, ConfigManager, EnvSource, MergeDefaults, parse_assignment, resolve_config,
};
use crate::ui::Style;

/// Prints the effective configuration with API keys masked.
pub fn show(manager: &ConfigManager) -> Result<()> {
    let file_config = manager.load_or_default();
    let resolved = resolve_config(&file_config, &EnvSource::from_process())?;

    let location = if manager.exists() {
        manager.config_path().display().to_string()
    } else {
        format!("{} (not created)", manager.config_path().display())
    };

    println!("{}", Style::header("Configuration"));
    println!("  {} {}", Style::label("file"), Style::secondary(location));
    println!();
    for line in resolved.display_lines() {
        println!("  {line}");
    }

    let merge = &file_config.merge;
    if merge != &MergeDefaults::default() {
        println!();
        println!("{}", Style::header("[merge]"));
        if let Some(order) = &merge.order {
            println!("  order = \"{order}\"");
        }
        if let Some(separator) = &merge.separator {
            println!("  separator = {separator:?}");
        }
        if let Some(depth) = merge.toc_depth {
            println!("  toc_depth = {depth}");
        }
        if let Some(level) = merge.base_level {
            println!("  base_level = {level}");
        }
    }

    Ok(())
}

/// Writes a config file filled with the built-in defaults.
pub fn init(manager: &ConfigManager, force: bool) -> Result<()> {
    if manager.exists() && !force {
        bail!(
            "Config file already exists: {}\n\nUse 'doc config init --force' to overwrite it.",
            manager.config_path().display()
        );
    }

    manager.save(&ConfigFile::with_defaults())?;
    println!(
        "{} Created {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );
    Ok(())
}

/// Applies `key=value` pairs and saves the file.
///
/// Nothing is written unless every pair is valid.
pub fn set(manager: &ConfigManager, pairs: &[String]) -> Result<()> {
    let mut config = if manager.exists() {
        manager.load()?
    } else {
        ConfigFile::default()
    };

    let mut keys = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (key, value) = parse_assignment(pair)?;
        config.set(key, value)?;
        keys.push(key);
    }

    manager.save(&config)?;
    for key in keys {
        println!("{} {}", Style::success("✓"), Style::value(key));
    }
    println!(
        "  {}",
        Style::secondary(format!("saved to {}", manager.config_path().display()))
    );
    Ok(())
}
