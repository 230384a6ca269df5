//! Environment startup (restart) API

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::esv::RestartStatus;
use reqwest::Method;

/// Current restart status
pub async fn get_status(client: &ApiClient) -> CliResult<RestartStatus> {
    let request = client.platform_request(Method::GET, "/environment/startup")?;
    client.send_json(request).await
}

/// Start a restart that loads pending secrets and variables
pub async fn initiate_restart(client: &ApiClient) -> CliResult<RestartStatus> {
    let request = client.platform_request(Method::POST, "/environment/startup?_action=restart")?;
    client.send_json(request).await
}
