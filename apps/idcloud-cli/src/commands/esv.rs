//! Secret and variable update commands

use super::ConnectionArgs;
use crate::error::CliResult;
use crate::ops::startup::{self, ApplyOptions, ApplyOutcome, RestartPolicy};
use crate::output::ConsoleReporter;
use clap::{Args, Subcommand};

/// Arguments for the esv command
#[derive(Args, Debug)]
pub struct EsvArgs {
    #[command(subcommand)]
    pub command: EsvCommands,
}

#[derive(Subcommand, Debug)]
pub enum EsvCommands {
    /// List secrets and variables with unapplied changes
    Check,

    /// Apply pending changes by restarting the tenant
    Apply {
        /// Restart even if nothing is pending
        #[arg(long)]
        force: bool,

        /// Wait until the restart completes
        #[arg(short, long)]
        wait: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute the esv command
pub async fn execute(args: EsvArgs, connection: &ConnectionArgs) -> CliResult<()> {
    let client = connection.connect().await?;
    let reporter = ConsoleReporter::new();

    match args.command {
        EsvCommands::Check => {
            startup::check_for_updates(&client, &reporter).await?;
        }
        EsvCommands::Apply { force, wait, yes } => {
            let options = ApplyOptions { force, wait, yes };
            let outcome =
                startup::apply_updates(&client, &reporter, options, RestartPolicy::default())
                    .await?;
            tracing::info!(?outcome, "apply finished");
            if outcome == ApplyOutcome::Declined {
                crate::output::print_info("No changes applied.");
            }
        }
    }
    Ok(())
}
