//! # vitrine-cli
//!
//! Operator CLI for a Vitrine site's content:
//! - `check`: load and validate every category (the build gate)
//! - `list` / `show`: inspect documents, as text or JSON
//! - `paths`: static routes from front matter only
//! - `config`: locate, read, or create `vitrine.toml`

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command, ConfigAction};
pub use config::SiteConfig;
pub use error::{Error, Result};

/// Run a parsed command line, writing command output to `out`.
pub async fn run<W: std::io::Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Command::Config { action } => {
            config_handlers::handle_config_command(cli.config.as_deref(), action, out)
        }
        command => {
            let site = SiteConfig::load(cli.config.as_deref())?;
            commands::dispatch(&site, command, out).await
        }
    }
}
