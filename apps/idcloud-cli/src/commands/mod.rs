//! CLI command implementations

pub mod completions;
pub mod config;
pub mod esv;
pub mod info;
pub mod logs;
pub mod saml;

use crate::api::ApiClient;
use crate::config::{Config, ConfigPaths};
use crate::error::CliResult;
use crate::models::Session;
use crate::ops;
use clap::Args;
use tracing::debug;

/// Connection flags shared by every command that talks to a tenant
///
/// Flags win over `IDCLOUD_*` environment variables, which win over the
/// config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Tenant URL, e.g. https://tenant.example.com/am
    #[arg(long, global = true, env = "IDCLOUD_TENANT")]
    pub tenant: Option<String>,

    /// Realm to operate in
    #[arg(long, global = true, env = "IDCLOUD_REALM")]
    pub realm: Option<String>,

    /// Administrator username
    #[arg(short, long, global = true, env = "IDCLOUD_USERNAME")]
    pub username: Option<String>,

    /// Administrator password
    #[arg(short, long, global = true, env = "IDCLOUD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Bearer token for environment and managed object endpoints
    #[arg(long, global = true, env = "IDCLOUD_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Log API key
    #[arg(long, global = true, env = "IDCLOUD_LOG_API_KEY")]
    pub log_api_key: Option<String>,

    /// Log API secret
    #[arg(long, global = true, env = "IDCLOUD_LOG_API_SECRET", hide_env_values = true)]
    pub log_api_secret: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,
}

impl ConnectionArgs {
    /// Build a session from the config file overlaid with these flags
    pub fn session(&self) -> CliResult<Session> {
        let paths = ConfigPaths::new()?;
        let config = Config::load(&paths)?;
        self.session_from(&config)
    }

    /// Build a session from `config` overlaid with these flags
    pub fn session_from(&self, config: &Config) -> CliResult<Session> {
        let mut config = config.clone();
        if let Some(tenant) = &self.tenant {
            config.tenant_url = Some(tenant.clone());
        }
        if let Some(realm) = &self.realm {
            config.realm = realm.clone();
        }
        if self.insecure {
            config.insecure = true;
        }

        let mut session = Session::from_config(&config)?;
        if let Some(username) = &self.username {
            session.username = Some(username.clone());
        }
        session.password = self.password.clone();
        session.bearer_token = self.bearer_token.clone();
        session.log_api_key = self.log_api_key.clone();
        session.log_api_secret = self.log_api_secret.clone();
        debug!(?session, "session");
        Ok(session)
    }

    /// Build the client and log in
    pub async fn connect(&self) -> CliResult<ApiClient> {
        let mut client = ApiClient::new(self.session()?)?;
        ops::auth::login(&mut client).await?;
        Ok(client)
    }

    /// Build the client without logging in, for log API key requests
    pub fn connect_without_login(&self) -> CliResult<ApiClient> {
        ApiClient::new(self.session()?)
    }
}
