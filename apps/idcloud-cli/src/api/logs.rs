//! Tenant log API

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::logs::{CreateLogApiKeyRequest, LogApiKey, LogEvent};
use crate::models::PagedResult;
use reqwest::Method;

/// Available log sources
pub async fn get_sources(client: &ApiClient) -> CliResult<PagedResult<String>> {
    let request = client.logs_request(Method::GET, "/monitoring/logs/sources")?;
    client.send_json(request).await
}

/// One page of recent log events; pass the previous page's cookie to continue
pub async fn tail(
    client: &ApiClient,
    source: &str,
    cookie: Option<&str>,
) -> CliResult<PagedResult<LogEvent>> {
    let mut path = format!("/monitoring/logs/tail?source={}", urlencoding::encode(source));
    if let Some(cookie) = cookie {
        path.push_str("&_pagedResultsCookie=");
        path.push_str(&urlencoding::encode(cookie));
    }
    let request = client.logs_request(Method::GET, &path)?;
    client.send_json(request).await
}

/// List log API keys
pub async fn get_api_keys(client: &ApiClient) -> CliResult<PagedResult<LogApiKey>> {
    let request = client.platform_request(Method::GET, "/keys")?;
    client.send_json(request).await
}

/// Create a log API key; the secret is only returned here
pub async fn create_api_key(client: &ApiClient, name: &str) -> CliResult<LogApiKey> {
    let body = CreateLogApiKeyRequest {
        name: name.to_string(),
    };
    let request = client
        .platform_request(Method::POST, "/keys?_action=create")?
        .json(&body);
    client.send_json(request).await
}
