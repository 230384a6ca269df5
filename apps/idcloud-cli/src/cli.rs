//! Command-line definition and dispatch

use crate::commands::{self, ConnectionArgs};
use crate::error::CliResult;
use clap::{ArgAction, Parser, Subcommand};

/// idcloud - administer a cloud identity platform tenant
#[derive(Parser, Debug)]
#[command(name = "idcloud")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage SAML entity providers
    Saml(commands::saml::SamlArgs),

    /// Check and apply pending secret and variable changes
    Esv(commands::esv::EsvArgs),

    /// Read tenant logs and manage log API keys
    Logs(commands::logs::LogsArgs),

    /// Show connection details after login
    Info(commands::info::InfoArgs),

    /// Show or edit stored defaults
    Config(commands::config::ConfigArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Default tracing filter for the verbosity count
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "idcloud_cli=info",
            2 => "idcloud_cli=debug",
            _ => "idcloud_cli=trace",
        }
    }
}

/// Run the parsed command
pub async fn run(cli: Cli) -> CliResult<()> {
    let connection = cli.connection;
    match cli.command {
        Commands::Saml(args) => commands::saml::execute(args, &connection).await,
        Commands::Esv(args) => commands::esv::execute(args, &connection).await,
        Commands::Logs(args) => commands::logs::execute(args, &connection).await,
        Commands::Info(args) => commands::info::execute(args, &connection).await,
        Commands::Config(args) => commands::config::execute(args).await,
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
