//! HTTP client wrapper for the identity platform API

use crate::error::{CliError, CliResult};
use crate::models::Session;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Version header understood by access management endpoints
pub const API_VERSION_HEADER: &str = "Accept-API-Version";

/// Error body returned by the platform on rejection
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// API client for making authenticated requests
///
/// Owns the session for the lifetime of the process. Access management
/// endpoints hang off the tenant URL and authenticate with the session
/// cookie; platform endpoints hang off the tenant origin and prefer the
/// bearer token.
pub struct ApiClient {
    client: Client,
    session: Session,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(session: Session) -> CliResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(session.timeout_secs))
            .danger_accept_invalid_certs(session.insecure)
            .build()
            .map_err(|e| CliError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, session })
    }

    /// Get a reference to the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session, used by login to record cookie and version
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Absolute URL for an access management path
    pub fn am_url(&self, path: &str) -> String {
        format!("{}{}", self.session.tenant, path)
    }

    /// Absolute URL for a platform path (relative to the tenant origin)
    pub fn platform_url(&self, path: &str) -> CliResult<String> {
        Ok(format!("{}{}", self.session.tenant_origin()?, path))
    }

    /// Request against an access management endpoint
    pub fn am_request(&self, method: Method, path: &str, api_version: &str) -> RequestBuilder {
        let url = self.am_url(path);
        debug!(%method, %url, "am request");

        let request = self
            .client
            .request(method, url)
            .header(API_VERSION_HEADER, api_version);
        self.with_cookie(request)
    }

    /// Request against a platform endpoint
    pub fn platform_request(&self, method: Method, path: &str) -> CliResult<RequestBuilder> {
        let url = self.platform_url(path)?;
        debug!(%method, %url, "platform request");

        let request = self.client.request(method, url);
        Ok(match &self.session.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => self.with_cookie(request),
        })
    }

    /// Request against a log endpoint, authenticated with the log API key
    pub fn logs_request(&self, method: Method, path: &str) -> CliResult<RequestBuilder> {
        let (key, secret) = match (&self.session.log_api_key, &self.session.log_api_secret) {
            (Some(key), Some(secret)) => (key, secret),
            _ => {
                return Err(CliError::Config(
                    "log API key and secret are required. Pass --log-api-key/--log-api-secret or create one with 'idcloud logs keys create'".to_string(),
                ))
            }
        };

        let url = self.platform_url(path)?;
        debug!(%method, %url, "logs request");

        Ok(self
            .client
            .request(method, url)
            .header("x-api-key", key)
            .header("x-api-secret", secret))
    }

    /// Send a request and parse a JSON response
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> CliResult<T> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        trace!(body = %body, "response body");
        serde_json::from_str(&body)
            .map_err(|e| CliError::Network(format!("Invalid response from server: {e}")))
    }

    /// Send a request and return the body as text
    pub async fn send_text(&self, request: RequestBuilder) -> CliResult<String> {
        let response = self.send(request).await?;
        Ok(response.text().await?)
    }

    /// Send a request, mapping non-success statuses to [`CliError::Api`]
    pub async fn send(&self, request: RequestBuilder) -> CliResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }

    fn with_cookie(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.session.cookie_name, &self.session.cookie_value) {
            (Some(name), Some(value)) => request.header("Cookie", format!("{name}={value}")),
            _ => request,
        }
    }
}

/// Build an API error from a status code and response body
pub fn api_error(status: u16, body: &str) -> CliError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => CliError::Api {
            status,
            code: parsed.code,
            message: parsed
                .message
                .or(parsed.reason)
                .unwrap_or_else(|| body.to_string()),
        },
        Err(_) => CliError::Api {
            status,
            code: None,
            message: if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            },
        },
    }
}
