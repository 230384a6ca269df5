//! idcloud - command-line administration for a cloud identity platform
//!
//! - Export and import SAML entity providers with their scripts and metadata
//! - Check for and apply pending secret and variable changes
//! - Tail tenant logs and manage log API keys

use clap::Parser;
use idcloud_cli::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}
