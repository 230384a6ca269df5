//! Managed object API

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::esv::TeamMember;
use reqwest::Method;

/// Managed object type of tenant administrators
pub const TEAM_MEMBER: &str = "teammember";

/// Get a tenant administrator by ID
pub async fn get_team_member(client: &ApiClient, id: &str) -> CliResult<TeamMember> {
    let path = format!(
        "/openidm/managed/{TEAM_MEMBER}/{}",
        urlencoding::encode(id)
    );
    let request = client.platform_request(Method::GET, &path)?;
    client.send_json(request).await
}
