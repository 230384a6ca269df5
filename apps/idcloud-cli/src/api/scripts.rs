//! Script API

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::ScriptRecord;
use reqwest::Method;

const SCRIPT_API_VERSION: &str = "protocol=2.0,resource=1.0";

fn script_path(client: &ApiClient, id: &str) -> String {
    format!(
        "/json{}/scripts/{}",
        client.session().realm_path(),
        urlencoding::encode(id)
    )
}

/// Get a script; the body comes back base64-encoded
pub async fn get_script(client: &ApiClient, id: &str) -> CliResult<ScriptRecord> {
    let request = client.am_request(Method::GET, &script_path(client, id), SCRIPT_API_VERSION);
    client.send_json(request).await
}

/// Create or replace a script
pub async fn put_script(
    client: &ApiClient,
    id: &str,
    script: &ScriptRecord,
) -> CliResult<ScriptRecord> {
    let request = client
        .am_request(Method::PUT, &script_path(client, id), SCRIPT_API_VERSION)
        .json(script);
    client.send_json(request).await
}
