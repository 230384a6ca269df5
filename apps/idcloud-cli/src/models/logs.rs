//! Tenant log models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single log entry from the tail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default)]
    pub payload: Value,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(rename = "type", default)]
    pub event_type: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

/// Log API key; id and secret are only returned on creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogApiKey {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_secret: Option<String>,
}

/// Request body for creating a log API key
#[derive(Debug, Clone, Serialize)]
pub struct CreateLogApiKeyRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_key_has_secret() {
        let key: LogApiKey = serde_json::from_str(
            r#"{"_id":"k1","name":"ci","createdAt":"2024-01-01","api_key_id":"id","api_key_secret":"s"}"#,
        )
        .unwrap();
        assert_eq!(key.api_key_secret.as_deref(), Some("s"));
    }

    #[test]
    fn test_event_payload_may_be_text() {
        let event: LogEvent =
            serde_json::from_str(r#"{"payload":"plain line","type":"text/plain","source":"am-core"}"#)
                .unwrap();
        assert_eq!(event.payload, Value::String("plain line".to_string()));
        assert_eq!(event.event_type.as_deref(), Some("text/plain"));
    }
}
