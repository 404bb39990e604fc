//! CLI command implementations.
//!
//! | Module    | Commands handled                                |
//! |-----------|-------------------------------------------------|
//! | `locate`  | `Locate`, `Orchestration`, `HasOrchestration`   |
//! | `tokens`  | `Tokens`                                        |
//! | `config`  | `Config`                                        |

pub mod config;
pub mod locate;
pub mod tokens;

pub use config::cmd_config;
pub use locate::{cmd_has_orchestration, cmd_locate, cmd_orchestration};
pub use tokens::cmd_tokens;

use anyhow::Result;
use pslocate::CommandLocator;
use pslocate::config::LocatorConfig;
use pslocate::util::split_list;

use super::Cli;

/// Build the layered configuration for this invocation.
pub fn load_config(project_dir: &std::path::Path, cli: &Cli) -> Result<LocatorConfig> {
    let cli_extensions = cli.extensions.as_deref().map(split_list);
    LocatorConfig::with_cli_args(project_dir.to_path_buf(), cli_extensions)
}

/// Build a locator from the layered configuration.
pub fn configured_locator(project_dir: &std::path::Path, cli: &Cli) -> Result<CommandLocator> {
    let config = load_config(project_dir, cli)?;
    Ok(CommandLocator::new(config.scan_options()?))
}
