//! Server info and authentication API

use crate::api::ApiClient;
use crate::error::{CliError, CliResult};
use crate::models::auth::{AuthenticateResponse, ServerInfo, ServerVersion};
use crate::models::realm_path;
use reqwest::Method;

const SERVER_INFO_API_VERSION: &str = "resource=1.1";
const AUTHENTICATE_API_VERSION: &str = "resource=2.0, protocol=1.0";

/// Get server info; only the cookie name is used
pub async fn get_server_info(client: &ApiClient) -> CliResult<ServerInfo> {
    let request = client.am_request(Method::GET, "/json/serverinfo/*", SERVER_INFO_API_VERSION);
    client.send_json(request).await
}

/// Get the platform version
pub async fn get_server_version(client: &ApiClient) -> CliResult<ServerVersion> {
    let request = client.am_request(
        Method::GET,
        "/json/serverinfo/version",
        SERVER_INFO_API_VERSION,
    );
    client.send_json(request).await
}

/// Authenticate with username and password in a single step
///
/// Credentials always go to the root realm. A 401 means the credentials were
/// rejected.
pub async fn authenticate(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> CliResult<AuthenticateResponse> {
    let path = format!("/json{}/authenticate", get_realm_url("/"));
    let request = client
        .am_request(Method::POST, &path, AUTHENTICATE_API_VERSION)
        .header("X-OpenAM-Username", username)
        .header("X-OpenAM-Password", password)
        .json(&serde_json::json!({}));

    match client.send_json(request).await {
        Err(CliError::Api { status: 401, message, .. }) => {
            Err(CliError::AuthenticationFailed(message))
        }
        other => other,
    }
}

/// Realm URL segment, e.g. `/realms/root/realms/alpha`
pub fn get_realm_url(realm: &str) -> String {
    realm_path(realm)
}
