//! Shared helpers for integration tests
//!
//! Provides a mock tenant, an authenticated client pointed at it, a
//! reporter that records everything, and fixture builders.

#![allow(dead_code)]

use idcloud_cli::api::ApiClient;
use idcloud_cli::error::CliResult;
use idcloud_cli::formats::encoding::{encode_entity_id, encode_text};
use idcloud_cli::models::Session;
use idcloud_cli::output::{MessageLevel, ProgressStatus, Reporter};
use serde_json::{json, Value};
use std::sync::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REALM_BASE: &str = "/am/json/realms/root/realms/alpha";
pub const SAML_BASE: &str = "/am/json/realms/root/realms/alpha/realm-config/saml2";

/// Initialise tracing once for tests that want log output (RUST_LOG)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test context with a mock tenant
pub struct TestContext {
    pub server: MockServer,
}

impl TestContext {
    pub async fn new() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    /// Tenant URL of the mock server, e.g. `http://127.0.0.1:1234/am`
    pub fn tenant(&self) -> String {
        format!("{}/am", self.server.uri())
    }

    /// Session without credentials
    pub fn session(&self) -> Session {
        Session::new(self.tenant(), "alpha")
    }

    /// Client with a session cookie already in place
    pub fn client(&self) -> ApiClient {
        let session = self
            .session()
            .with_cookie("iPlanetDirectoryPro", "test-token")
            .with_log_api_key("log-key", "log-secret");
        ApiClient::new(session).expect("client")
    }

    // =========================================================================
    // SAML mocks
    // =========================================================================

    /// Mock the full provider listing
    pub async fn mock_provider_list(&self, stubs: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(SAML_BASE))
            .and(query_param("_queryFilter", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paged(stubs)))
            .mount(&self.server)
            .await;
    }

    /// Mock the exact-match lookup for an entity ID
    pub async fn mock_provider_find(&self, entity_id: &str, matches: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(SAML_BASE))
            .and(query_param("_queryFilter", format!("entityId eq '{entity_id}'")))
            .respond_with(ResponseTemplate::new(200).set_body_json(paged(matches)))
            .mount(&self.server)
            .await;
    }

    /// Mock fetching a full provider record
    pub async fn mock_provider_get(&self, location: &str, provider: &Value) {
        let id = provider["_id"].as_str().expect("_id");
        Mock::given(method("GET"))
            .and(path(format!("{SAML_BASE}/{location}/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(provider.clone()))
            .mount(&self.server)
            .await;
    }

    /// Mock the metadata document of a provider
    pub async fn mock_metadata(&self, entity_id: &str, xml: &str) {
        Mock::given(method("GET"))
            .and(path("/am/saml2/jsp/exportmetadata.jsp"))
            .and(query_param("entityid", entity_id))
            .respond_with(ResponseTemplate::new(200).set_body_string(xml))
            .mount(&self.server)
            .await;
    }

    /// Mock fetching a script
    pub async fn mock_script_get(&self, script: &Value) {
        let id = script["_id"].as_str().expect("_id");
        Mock::given(method("GET"))
            .and(path(format!("{REALM_BASE}/scripts/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(script.clone()))
            .mount(&self.server)
            .await;
    }

    /// Mock any script write, echoing the body back
    pub async fn mock_script_put(&self) {
        Mock::given(method("PUT"))
            .and(wiremock::matchers::path_regex(format!("^{REALM_BASE}/scripts/.+$")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "stored",
                "script": ""
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock hosted and remote provider creation
    pub async fn mock_provider_create(&self) {
        Mock::given(method("POST"))
            .and(path(format!("{SAML_BASE}/hosted")))
            .and(query_param("_action", "create"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "created"})))
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{SAML_BASE}/remote")))
            .and(query_param("_action", "importEntity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far matching a method and path
    pub async fn received(&self, http_method: &str, url_path: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == url_path)
            .collect()
    }

    /// Count of received write requests (POST, PUT, PATCH, DELETE)
    pub async fn write_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| matches!(r.method.as_str(), "POST" | "PUT" | "PATCH" | "DELETE"))
            .count()
    }
}

/// Wrap items in a query result envelope
pub fn paged(items: Vec<Value>) -> Value {
    json!({
        "result": items,
        "resultCount": items.len(),
        "pagedResultsCookie": null
    })
}

// =============================================================================
// Fixtures
// =============================================================================

/// List entry for a provider
pub fn stub_fixture(entity_id: &str, location: &str, roles: &[&str]) -> Value {
    json!({
        "_id": encode_entity_id(entity_id),
        "entityId": entity_id,
        "location": location,
        "roles": roles
    })
}

/// Hosted identity provider with optional script references
pub fn hosted_idp_fixture(
    entity_id: &str,
    mapper_script: Option<&str>,
    adapter_script: Option<&str>,
) -> Value {
    json!({
        "_id": encode_entity_id(entity_id),
        "_rev": "1234",
        "entityId": entity_id,
        "identityProvider": {
            "assertionProcessing": {
                "attributeMapper": {
                    "attributeMapperScript": mapper_script.unwrap_or("[Empty]")
                }
            },
            "advanced": {
                "idpAdapter": {
                    "idpAdapterScript": adapter_script.unwrap_or("[Empty]")
                }
            },
            "assertionContent": {
                "nameIdFormat": {"nameIdFormatList": ["urn:oasis:names:tc:SAML:2.0:nameid-format:persistent"]}
            }
        }
    })
}

/// Remote service provider
pub fn remote_sp_fixture(entity_id: &str) -> Value {
    json!({
        "_id": encode_entity_id(entity_id),
        "_rev": "99",
        "entityId": entity_id,
        "serviceProvider": {
            "assertionProcessing": {"accountMapping": {"useNameIDAsSPUserID": true}}
        }
    })
}

/// Script as returned by the API (base64 body)
pub fn script_fixture(id: &str, source: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("{id} script"),
        "language": "JAVASCRIPT",
        "context": "SAML2_IDP_ATTRIBUTE_MAPPER",
        "script": encode_text(source)
    })
}

/// Minimal metadata document
pub fn metadata_fixture(entity_id: &str) -> String {
    format!(
        "<EntityDescriptor xmlns=\"urn:oasis:names:tc:SAML:2.0:metadata\" entityID=\"{entity_id}\">\n  <SPSSODescriptor/>\n</EntityDescriptor>"
    )
}

/// Valid provenance block
pub fn meta_fixture() -> Value {
    json!({
        "origin": "https://source.example.com/am",
        "originAmVersion": "7.3.0",
        "exportedBy": "admin",
        "exportDate": "2024-05-01T10:00:00Z",
        "exportTool": "idcloud-cli",
        "exportToolVersion": "v0.1.0"
    })
}

// =============================================================================
// Recording reporter
// =============================================================================

/// Everything a reporter was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(MessageLevel, String),
    Table(Vec<String>, Vec<Vec<String>>),
    Start(Option<u64>, String),
    Update(String),
    Stop(ProgressStatus, String),
    Confirm(String),
}

/// Reporter that records events and answers confirmations with a fixed value
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
    answer: bool,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::answering(true)
    }

    pub fn answering(answer: bool) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            answer,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Lines printed as data
    pub fn data(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(MessageLevel::Data, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Messages at error level
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(MessageLevel::Error, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Progress updates in order
    pub fn updates(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Update(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// The last progress stop
    pub fn last_stop(&self) -> Option<(ProgressStatus, String)> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Stop(status, text) => Some((status, text)),
            _ => None,
        })
    }

    /// The last table printed
    pub fn last_table(&self) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Table(headers, rows) => Some((headers, rows)),
            _ => None,
        })
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn message(&self, level: MessageLevel, text: &str) {
        self.push(Event::Message(level, text.to_string()));
    }

    fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        self.push(Event::Table(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.to_vec(),
        ));
    }

    fn start_progress(&self, total: Option<u64>, message: &str) {
        self.push(Event::Start(total, message.to_string()));
    }

    fn update_progress(&self, message: &str) {
        self.push(Event::Update(message.to_string()));
    }

    fn stop_progress(&self, status: ProgressStatus, message: &str) {
        self.push(Event::Stop(status, message.to_string()));
    }

    fn confirm(&self, question: &str) -> CliResult<bool> {
        self.push(Event::Confirm(question.to_string()));
        Ok(self.answer)
    }
}
