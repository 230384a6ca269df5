//! Info command - show the tenant connection after login

use super::ConnectionArgs;
use crate::error::CliResult;
use crate::output::print_key_value;
use clap::Args;
use serde::Serialize;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InfoOutput<'a> {
    tenant: &'a str,
    realm: &'a str,
    username: Option<&'a str>,
    cookie_name: Option<&'a str>,
    version: Option<&'a str>,
    tool_version: &'a str,
}

/// Execute the info command
pub async fn execute(args: InfoArgs, connection: &ConnectionArgs) -> CliResult<()> {
    let client = connection.connect().await?;
    let session = client.session();

    let output = InfoOutput {
        tenant: &session.tenant,
        realm: &session.realm,
        username: session.username.as_deref(),
        cookie_name: session.cookie_name.as_deref(),
        version: session.am_version.as_deref(),
        tool_version: &session.tool_version,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        print_key_value("Tenant", output.tenant);
        print_key_value("Realm", output.realm);
        print_key_value("Username", output.username.unwrap_or("(bearer token)"));
        print_key_value("Cookie Name", output.cookie_name.unwrap_or("-"));
        print_key_value("Version", output.version.unwrap_or("unknown"));
        print_key_value("Tool Version", output.tool_version);
        println!();
    }
    Ok(())
}
