//! Session context threaded through every API call

use crate::config::Config;
use crate::error::{CliError, CliResult};
use reqwest::Url;
use std::fmt;

/// Connection and authentication state for one CLI invocation
///
/// Built from configuration and flags, completed by login, then owned by the
/// [`ApiClient`](crate::api::ApiClient). Nothing here is persisted.
#[derive(Clone, Default)]
pub struct Session {
    /// Tenant URL without trailing slash, e.g. `https://tenant.example.com/am`
    pub tenant: String,

    /// Realm name, e.g. `alpha` or `/` for the root realm
    pub realm: String,

    pub username: Option<String>,
    pub password: Option<String>,

    /// Session cookie name reported by the server
    pub cookie_name: Option<String>,

    /// Session token returned by authenticate
    pub cookie_value: Option<String>,

    /// Bearer token for platform (environment/managed object) endpoints
    pub bearer_token: Option<String>,

    pub log_api_key: Option<String>,
    pub log_api_secret: Option<String>,

    /// Platform version reported by the server
    pub am_version: Option<String>,

    /// Version string of this tool, recorded in export metadata
    pub tool_version: String,

    /// Accept invalid TLS certificates
    pub insecure: bool,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Session {
    /// Create a session for a tenant and realm
    pub fn new(tenant: impl Into<String>, realm: impl Into<String>) -> Self {
        let tenant: String = tenant.into();
        Self {
            tenant: tenant.trim_end_matches('/').to_string(),
            realm: realm.into(),
            tool_version: format!("v{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            ..Self::default()
        }
    }

    /// Create a session from stored configuration
    pub fn from_config(config: &Config) -> CliResult<Self> {
        let tenant = config.tenant_url.as_deref().ok_or_else(|| {
            CliError::Config(
                "no tenant URL configured. Pass --tenant or run 'idcloud config set tenant_url <url>'"
                    .to_string(),
            )
        })?;

        let mut session = Self::new(tenant, config.realm.clone());
        session.username = config.username.clone();
        session.timeout_secs = config.timeout_secs;
        session.insecure = config.insecure;
        Ok(session)
    }

    /// Set username and password
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the session cookie directly (skips authenticate)
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookie_name = Some(name.into());
        self.cookie_value = Some(value.into());
        self
    }

    /// Set the bearer token for platform endpoints
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the log API key and secret
    pub fn with_log_api_key(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.log_api_key = Some(key.into());
        self.log_api_secret = Some(secret.into());
        self
    }

    /// Scheme, host and port of the tenant URL
    ///
    /// Platform endpoints (environment, logs, managed objects) live at the
    /// origin rather than under the access management path.
    pub fn tenant_origin(&self) -> CliResult<String> {
        let url = Url::parse(&self.tenant)
            .map_err(|e| CliError::Config(format!("invalid tenant URL '{}': {e}", self.tenant)))?;
        Ok(url.origin().ascii_serialization())
    }

    /// Realm path segment, e.g. `/realms/root/realms/alpha`
    pub fn realm_path(&self) -> String {
        realm_path(&self.realm)
    }

    /// Whether the session carries any usable credential
    pub fn is_authenticated(&self) -> bool {
        self.cookie_value.is_some() || self.bearer_token.is_some()
    }

    /// Realm name as used in file names, e.g. `Alpha`
    pub fn realm_label(&self) -> String {
        let label: String = self
            .realm
            .split('/')
            .filter(|s| !s.is_empty())
            .map(capitalize)
            .collect();
        if label.is_empty() {
            "Root".to_string()
        } else {
            label
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tenant", &self.tenant)
            .field("realm", &self.realm)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("cookie_name", &self.cookie_name)
            .field("cookie_value", &self.cookie_value.as_ref().map(|_| "***"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "***"))
            .field("log_api_key", &self.log_api_key)
            .field("am_version", &self.am_version)
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// Build the realm path for a realm name
///
/// The root realm maps to `/realms/root`; any other realm is nested below it.
/// A single leading slash is ignored.
pub fn realm_path(realm: &str) -> String {
    let name = if realm.len() > 1 {
        realm.strip_prefix('/').unwrap_or(realm)
    } else {
        realm
    };

    let mut path = "/realms/root".to_string();
    if name != "/" && name != "root" && !name.is_empty() {
        path.push_str("/realms/");
        path.push_str(name);
    }
    path
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
