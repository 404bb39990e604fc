//! Declaration discovery commands: `pslocate locate`, `orchestration`, `has-orchestration`.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use pslocate::{CommandMap, DeclarationKind};

use super::super::Cli;
use super::configured_locator;

pub fn cmd_locate(
    project_dir: &Path,
    cli: &Cli,
    root: Option<&Path>,
    kind: Option<&str>,
    json: bool,
) -> Result<()> {
    let kind = kind.map(str::parse::<DeclarationKind>).transpose()?;
    let root = root.unwrap_or(project_dir);

    let locator = configured_locator(project_dir, cli)?;
    let mut map = locator.locate(root)?;
    if let Some(kind) = kind {
        map.retain_kind(kind);
    }

    if json {
        let out = serde_json::to_string_pretty(&map).context("Failed to serialize command map")?;
        println!("{}", out);
        return Ok(());
    }

    print_table(&map, root);
    Ok(())
}

fn print_table(map: &CommandMap, root: &Path) {
    if map.is_empty() {
        println!("No declarations found under {}", root.display());
        return;
    }

    let width = map.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
    println!(
        "{}  {}  {}",
        style(format!("{:<width$}", "NAME", width = width)).bold(),
        style(format!("{:<13}", "KIND")).bold(),
        style("SOURCE").bold(),
    );
    for record in map {
        println!(
            "{:<width$}  {:<13}  {}",
            record.name,
            record.kind.to_string(),
            record.source_path.display(),
            width = width
        );
    }
    println!();
    println!("{} declaration(s)", map.len());
}

pub fn cmd_orchestration(project_dir: &Path, cli: &Cli, file: &Path) -> Result<()> {
    let locator = configured_locator(project_dir, cli)?;
    let record = locator.require_orchestration(file)?;
    println!("{}", record.name);
    Ok(())
}

pub fn cmd_has_orchestration(project_dir: &Path, cli: &Cli, file: &Path) -> Result<()> {
    let locator = configured_locator(project_dir, cli)?;
    println!("{}", locator.has_orchestration(file)?);
    Ok(())
}
