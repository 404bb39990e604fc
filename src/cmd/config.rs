//! Configuration view and validation commands: `pslocate config`.

use anyhow::Result;
use std::path::Path;

use pslocate::config::{CONFIG_FILE, LocatorToml};

use super::super::{Cli, ConfigCommands};
use super::load_config;

pub fn cmd_config(project_dir: &Path, cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = project_dir.join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("pslocate Configuration");
            println!("======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
                println!();

                let toml = LocatorToml::load(&config_path)?;
                println!("[scan]");
                println!("  extensions = {:?}", toml.scan.extensions);
                println!("  follow_links = {}", toml.scan.follow_links);
                println!("  exclude = {:?}", toml.scan.exclude);
                println!();
            } else {
                println!("No {} found at {}", CONFIG_FILE, config_path.display());
                println!();
                println!("Using default configuration.");
                println!("Run 'pslocate config init' to create a {} file.", CONFIG_FILE);
                println!();
            }

            // Show effective values (including env overrides)
            let config = load_config(project_dir, cli)?;
            println!("Effective values (with env/CLI overrides):");
            println!("  extensions = {:?}", config.extensions());
            println!("  follow_links = {}", config.follow_links());
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No {} found. Using defaults (valid).", CONFIG_FILE);
                return Ok(());
            }

            let toml = LocatorToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("{} already exists at {}", CONFIG_FILE, config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !project_dir.exists() {
                std::fs::create_dir_all(project_dir)?;
            }

            LocatorToml::default().save(&config_path)?;

            println!("Created {} at {}", CONFIG_FILE, config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [scan] extensions, follow_links, exclude");
            println!();
        }
    }

    Ok(())
}
