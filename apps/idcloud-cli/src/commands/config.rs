//! Config command - show and edit the stored defaults

use crate::config::{Config, ConfigPaths};
use crate::error::CliResult;
use crate::output::{print_key_value, print_success};
use clap::{Args, Subcommand};

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the stored configuration
    Show,

    /// Set a configuration value
    Set {
        /// One of: tenant_url, realm, username, timeout_secs, insecure
        key: String,
        value: String,
    },

    /// Print the config file location
    Path,
}

/// Execute the config command
pub async fn execute(args: ConfigArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;

    match args.command {
        ConfigCommands::Show => {
            let config = Config::load(&paths)?;
            println!();
            print_key_value("tenant_url", config.tenant_url.as_deref().unwrap_or("(not set)"));
            print_key_value("realm", &config.realm);
            print_key_value("username", config.username.as_deref().unwrap_or("(not set)"));
            print_key_value("timeout_secs", &config.timeout_secs.to_string());
            print_key_value("insecure", &config.insecure.to_string());
            println!();
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(&paths)?;
            config.set(&key, &value)?;
            config.save(&paths)?;
            print_success(&format!("Set {key}"));
        }
        ConfigCommands::Path => {
            println!("{}", paths.config_file.display());
        }
    }
    Ok(())
}
