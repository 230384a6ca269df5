//! Tenant log commands

use super::ConnectionArgs;
use crate::error::CliResult;
use crate::ops::logs::{self, FOLLOW_INTERVAL};
use crate::output::ConsoleReporter;
use clap::{Args, Subcommand};

/// Arguments for the logs command
#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommands,
}

#[derive(Subcommand, Debug)]
pub enum LogsCommands {
    /// List available log sources
    Sources,

    /// Print recent events from a log source
    Tail {
        /// Log source, e.g. am-everything
        #[arg(short, long, default_value = "am-everything")]
        source: String,

        /// Keep polling for new events until interrupted
        #[arg(short, long)]
        follow: bool,
    },

    /// Manage log API keys
    #[command(subcommand)]
    Keys(KeysCommands),
}

#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// List log API keys
    List,

    /// Create a log API key
    Create {
        /// Key name
        #[arg(short, long)]
        name: String,
    },
}

/// Execute the logs command
pub async fn execute(args: LogsArgs, connection: &ConnectionArgs) -> CliResult<()> {
    let reporter = ConsoleReporter::new();

    match args.command {
        LogsCommands::Sources => {
            let client = connection.connect_without_login()?;
            logs::list_sources(&client, &reporter).await?;
        }
        LogsCommands::Tail { source, follow } => {
            let client = connection.connect_without_login()?;
            let follow = follow.then_some(FOLLOW_INTERVAL);
            logs::tail(&client, &reporter, &source, follow).await?;
        }
        LogsCommands::Keys(KeysCommands::List) => {
            let client = connection.connect().await?;
            logs::list_api_keys(&client, &reporter).await?;
        }
        LogsCommands::Keys(KeysCommands::Create { name }) => {
            let client = connection.connect().await?;
            logs::create_api_key(&client, &reporter, &name).await?;
        }
    }
    Ok(())
}
