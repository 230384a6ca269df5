//! Environment variables API

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::esv::EsvEntry;
use crate::models::PagedResult;
use reqwest::Method;

/// List all variables with their load state
pub async fn get_variables(client: &ApiClient) -> CliResult<PagedResult<EsvEntry>> {
    let request = client.platform_request(Method::GET, "/environment/variables")?;
    client.send_json(request).await
}
