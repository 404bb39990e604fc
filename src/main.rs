use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "pslocate")]
#[command(version, about = "Find functions and workflows declared in PowerShell scripts")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing pslocate.toml (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Script extensions to scan, comma-separated (e.g. "ps1,psm1"). Overrides pslocate.toml.
    #[arg(long, global = true)]
    pub extensions: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every declared function and workflow under a directory
    Locate {
        /// Directory (or single file) to scan; defaults to the project directory
        root: Option<PathBuf>,

        /// Only show one kind: routine (function) or orchestration (workflow)
        #[arg(short, long)]
        kind: Option<String>,

        /// Print the command map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the first workflow declared in a script file
    Orchestration {
        file: PathBuf,
    },
    /// Print whether a script file declares a workflow
    HasOrchestration {
        file: PathBuf,
    },
    /// Dump the token stream of a script file
    Tokens {
        file: PathBuf,
    },
    /// View, validate or create pslocate.toml
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default pslocate.toml file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pslocate::logging::init(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Locate { root, kind, json } => {
            cmd::cmd_locate(&project_dir, &cli, root.as_deref(), kind.as_deref(), *json)?
        }
        Commands::Orchestration { file } => cmd::cmd_orchestration(&project_dir, &cli, file)?,
        Commands::HasOrchestration { file } => {
            cmd::cmd_has_orchestration(&project_dir, &cli, file)?
        }
        Commands::Tokens { file } => cmd::cmd_tokens(file)?,
        Commands::Config { command } => cmd::cmd_config(&project_dir, &cli, command.clone())?,
    }

    Ok(())
}
