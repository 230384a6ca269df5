//! SAML2 entity provider API

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::{EntityProvider, PagedResult, ProviderLocation, ProviderStub};
use reqwest::Method;
use serde_json::{json, Value};

const SAML_API_VERSION: &str = "protocol=2.1,resource=1.0";

fn saml_path(client: &ApiClient, suffix: &str) -> String {
    format!(
        "/json{}/realm-config/saml2{}",
        client.session().realm_path(),
        suffix
    )
}

/// List all providers in the realm
pub async fn get_providers(client: &ApiClient) -> CliResult<PagedResult<ProviderStub>> {
    let path = saml_path(client, "?_queryFilter=true");
    let request = client.am_request(Method::GET, &path, SAML_API_VERSION);
    client.send_json(request).await
}

/// Query providers with a filter, returning only `fields`
pub async fn find_providers(
    client: &ApiClient,
    filter: &str,
    fields: &str,
) -> CliResult<PagedResult<ProviderStub>> {
    let path = saml_path(
        client,
        &format!(
            "?_queryFilter={}&_fields={}",
            urlencoding::encode(filter),
            urlencoding::encode(fields)
        ),
    );
    let request = client.am_request(Method::GET, &path, SAML_API_VERSION);
    client.send_json(request).await
}

/// Exact-match filter for an entity ID
pub fn entity_id_filter(entity_id: &str) -> String {
    format!("entityId eq '{entity_id}'")
}

/// Get the full provider record
pub async fn get_provider_by_location_and_id(
    client: &ApiClient,
    location: ProviderLocation,
    id64: &str,
) -> CliResult<EntityProvider> {
    let path = saml_path(client, &format!("/{location}/{id64}"));
    let request = client.am_request(Method::GET, &path, SAML_API_VERSION);
    client.send_json(request).await
}

/// URL of a provider's metadata document
pub fn get_provider_metadata_url(client: &ApiClient, entity_id: &str) -> String {
    client.am_url(&format!(
        "/saml2/jsp/exportmetadata.jsp?entityid={}&realm={}",
        urlencoding::encode(entity_id),
        urlencoding::encode(&client.session().realm)
    ))
}

/// Download a provider's metadata XML
pub async fn get_provider_metadata(client: &ApiClient, entity_id: &str) -> CliResult<String> {
    let path = format!(
        "/saml2/jsp/exportmetadata.jsp?entityid={}&realm={}",
        urlencoding::encode(entity_id),
        urlencoding::encode(&client.session().realm)
    );
    let request = client.am_request(Method::GET, &path, SAML_API_VERSION);
    client.send_text(request).await
}

/// Create a provider
///
/// Hosted providers are created from their configuration. Remote providers
/// are imported from base64url-encoded standard metadata.
pub async fn create_provider(
    client: &ApiClient,
    location: ProviderLocation,
    provider: &EntityProvider,
    metadata: Option<&str>,
) -> CliResult<Value> {
    let request = match location {
        ProviderLocation::Hosted => {
            let path = saml_path(client, "/hosted?_action=create");
            client
                .am_request(Method::POST, &path, SAML_API_VERSION)
                .json(provider)
        }
        ProviderLocation::Remote => {
            let path = saml_path(client, "/remote?_action=importEntity");
            client
                .am_request(Method::POST, &path, SAML_API_VERSION)
                .json(&json!({ "standardMetadata": metadata.unwrap_or_default() }))
        }
    };
    client.send_json(request).await
}
