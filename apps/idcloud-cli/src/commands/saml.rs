//! SAML entity provider commands

use super::ConnectionArgs;
use crate::error::{CliError, CliResult};
use crate::ops::saml;
use crate::output::ConsoleReporter;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the saml command
#[derive(Args, Debug)]
pub struct SamlArgs {
    #[command(subcommand)]
    pub command: SamlCommands,
}

#[derive(Subcommand, Debug)]
pub enum SamlCommands {
    /// List entity providers
    List {
        /// Show location and roles
        #[arg(short, long)]
        long: bool,
    },

    /// Describe an entity provider
    Describe {
        /// Entity ID
        #[arg(short = 'i', long = "entity-id")]
        entity_id: String,
    },

    /// Export entity providers with their scripts and metadata
    Export(ExportArgs),

    /// Export an entity provider's metadata XML
    Metadata {
        /// Entity ID
        #[arg(short = 'i', long = "entity-id")]
        entity_id: String,

        /// Output file (default: <entity-id>.metadata.xml)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Import entity providers from export files
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Entity ID of the provider to export
    #[arg(short = 'i', long = "entity-id", conflicts_with_all = ["all", "all_separate"])]
    pub entity_id: Option<String>,

    /// Output file
    #[arg(short, long, conflicts_with = "all_separate")]
    pub file: Option<PathBuf>,

    /// Export all providers into one file
    #[arg(short, long)]
    pub all: bool,

    /// Export all providers, one file each
    #[arg(short = 'A', long = "all-separate")]
    pub all_separate: bool,

    /// Directory for --all-separate
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Entity ID of the provider to import
    #[arg(short = 'i', long = "entity-id", conflicts_with_all = ["all", "all_separate"])]
    pub entity_id: Option<String>,

    /// Import file
    #[arg(short, long, conflicts_with = "all_separate")]
    pub file: Option<PathBuf>,

    /// Import all providers in the file
    #[arg(short, long)]
    pub all: bool,

    /// Import every *.saml.json file in the directory
    #[arg(short = 'A', long = "all-separate")]
    pub all_separate: bool,

    /// Directory for --all-separate
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,
}

/// Execute the saml command
pub async fn execute(args: SamlArgs, connection: &ConnectionArgs) -> CliResult<()> {
    let client = connection.connect().await?;
    let reporter = ConsoleReporter::new();

    match args.command {
        SamlCommands::List { long } => {
            saml::list_providers(&client, &reporter, long).await?;
        }
        SamlCommands::Describe { entity_id } => {
            saml::describe_provider(&client, &reporter, &entity_id).await?;
        }
        SamlCommands::Metadata { entity_id, file } => {
            saml::export_metadata(&client, &reporter, &entity_id, file.as_deref()).await?;
        }
        SamlCommands::Export(export) => {
            if export.all_separate {
                saml::export_providers_to_files(&client, &reporter, &export.directory).await?;
            } else if export.all {
                saml::export_providers_to_file(&client, &reporter, export.file.as_deref()).await?;
            } else if let Some(entity_id) = &export.entity_id {
                saml::export_provider(&client, &reporter, entity_id, export.file.as_deref())
                    .await?;
            } else {
                return Err(CliError::Validation(
                    "specify --entity-id, --all or --all-separate".to_string(),
                ));
            }
        }
        SamlCommands::Import(import) => {
            if import.all_separate {
                let result =
                    saml::import_providers_from_files(&client, &reporter, &import.directory)
                        .await?;
                return bulk_status(result.has_failures());
            }

            let file = import.file.as_deref().ok_or_else(|| {
                CliError::Validation("--file is required unless --all-separate is used".into())
            })?;
            if import.all {
                let result = saml::import_providers_from_file(&client, &reporter, file).await?;
                return bulk_status(result.has_failures());
            }
            match &import.entity_id {
                Some(entity_id) => {
                    saml::import_provider(&client, &reporter, entity_id, file).await?;
                }
                None => {
                    saml::import_first_provider(&client, &reporter, file).await?;
                }
            }
        }
    }
    Ok(())
}

/// Bulk runs report per-item failures themselves; only the exit code is left
fn bulk_status(has_failures: bool) -> CliResult<()> {
    if has_failures {
        Err(CliError::Validation(
            "one or more providers failed to import".to_string(),
        ))
    } else {
        Ok(())
    }
}
