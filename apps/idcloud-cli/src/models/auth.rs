//! Server info and authentication responses

use serde::{Deserialize, Serialize};

/// Subset of `/json/serverinfo/*`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub cookie_name: String,
}

/// `/json/serverinfo/version`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVersion {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub full_version: Option<String>,
}

impl ServerVersion {
    /// Short version string, e.g. `7.3.0`
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().or(self.full_version.as_deref())
    }
}

/// Successful authenticate response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    #[serde(default)]
    pub token_id: Option<String>,

    #[serde(default)]
    pub success_url: Option<String>,

    #[serde(default)]
    pub realm: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_prefers_short_form() {
        let v: ServerVersion =
            serde_json::from_str(r#"{"version":"7.3.0","fullVersion":"7.3.0 Build 5f2d"}"#)
                .unwrap();
        assert_eq!(v.version(), Some("7.3.0"));

        let v: ServerVersion = serde_json::from_str(r#"{"fullVersion":"7.4"}"#).unwrap();
        assert_eq!(v.version(), Some("7.4"));
    }
}
