//! Integration tests for SAML provider listing, lookup and export
//!
//! Tests cover:
//! - List (short and long form, sorted by id)
//! - Describe (found, not found, ambiguous)
//! - Export of one provider with both script kinds and metadata
//! - Export of all providers into one file and into separate files

mod common;

use common::{
    hosted_idp_fixture, metadata_fixture, remote_sp_fixture, script_fixture, stub_fixture,
    TestContext, RecordingReporter, SAML_BASE,
};
use idcloud_cli::error::CliError;
use idcloud_cli::formats::encoding::encode_entity_id;
use idcloud_cli::formats::files::read_envelope;
use idcloud_cli::models::{ProviderLocation, ScriptBody};
use idcloud_cli::ops::saml;
use idcloud_cli::output::ProgressStatus;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

const IDP: &str = "urn:example:idp";
const SP: &str = "https://sp.example.com/saml";

/// Fail the test if any provider is fetched by location
async fn forbid_fetch_by_location(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^{SAML_BASE}/(hosted|remote)/.+$")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&ctx.server)
        .await;
}

// =========================================================================
// List
// =========================================================================

#[tokio::test]
async fn test_list_short_sorted_by_id() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_list(vec![
        stub_fixture(SP, "remote", &["serviceProvider"]),
        stub_fixture(IDP, "hosted", &["identityProvider"]),
    ])
    .await;

    let reporter = RecordingReporter::new();
    let providers = saml::list_providers(&ctx.client(), &reporter, false)
        .await
        .unwrap();

    let mut expected = vec![(encode_entity_id(SP), SP), (encode_entity_id(IDP), IDP)];
    expected.sort();
    let expected: Vec<String> = expected.into_iter().map(|(_, e)| e.to_string()).collect();

    assert_eq!(providers.len(), 2);
    assert_eq!(reporter.data(), expected);
}

#[tokio::test]
async fn test_list_long_shows_role_labels() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_list(vec![stub_fixture(
        IDP,
        "hosted",
        &["identityProvider", "attributeQueryProvider"],
    )])
    .await;

    let reporter = RecordingReporter::new();
    saml::list_providers(&ctx.client(), &reporter, true)
        .await
        .unwrap();

    let (headers, rows) = reporter.last_table().expect("table");
    assert_eq!(headers, vec!["Entity Id", "Location", "Role(s)"]);
    assert_eq!(rows, vec![vec![IDP.to_string(), "hosted".into(), "IDP, AttrQuery".into()]]);
}

// =========================================================================
// Describe
// =========================================================================

#[tokio::test]
async fn test_describe_adds_location_roles_and_metadata_url() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_find(IDP, vec![json!({"_id": encode_entity_id(IDP), "location": "hosted", "roles": ["identityProvider"]})])
        .await;
    ctx.mock_provider_get("hosted", &hosted_idp_fixture(IDP, None, None))
        .await;

    let reporter = RecordingReporter::new();
    let described = saml::describe_provider(&ctx.client(), &reporter, IDP)
        .await
        .unwrap();

    assert!(described.get("_id").is_none());
    assert!(described.get("_rev").is_none());
    assert_eq!(described["location"], "hosted");
    assert_eq!(described["roles"], json!(["IDP"]));
    assert!(described["metadataUrl"]
        .as_str()
        .unwrap()
        .contains("/am/saml2/jsp/exportmetadata.jsp?entityid=urn%3Aexample%3Aidp&realm=alpha"));

    let (headers, rows) = reporter.last_table().expect("table");
    assert_eq!(headers, vec!["Key", "Value"]);
    assert!(rows.contains(&vec!["entityId".to_string(), IDP.to_string()]));
}

#[tokio::test]
async fn test_describe_not_found_skips_fetch() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_find(IDP, vec![]).await;
    forbid_fetch_by_location(&ctx).await;

    let reporter = RecordingReporter::new();
    let result = saml::describe_provider(&ctx.client(), &reporter, IDP).await;

    assert!(matches!(result, Err(CliError::NotFound(_))));
}

#[tokio::test]
async fn test_describe_ambiguous_skips_fetch() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_find(
        IDP,
        vec![
            json!({"_id": encode_entity_id(IDP), "location": "hosted"}),
            json!({"_id": encode_entity_id(IDP), "location": "remote"}),
        ],
    )
    .await;
    forbid_fetch_by_location(&ctx).await;

    let reporter = RecordingReporter::new();
    let result = saml::describe_provider(&ctx.client(), &reporter, IDP).await;

    assert!(matches!(result, Err(CliError::Ambiguous(_))));
}

// =========================================================================
// Export
// =========================================================================

#[tokio::test]
async fn test_export_provider_with_both_scripts() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_find(IDP, vec![json!({"_id": encode_entity_id(IDP), "location": "hosted"})])
        .await;
    ctx.mock_provider_get("hosted", &hosted_idp_fixture(IDP, Some("mapper-1"), Some("adapter-2")))
        .await;
    ctx.mock_script_get(&script_fixture("mapper-1", "var a = 1;\nmap(a);"))
        .await;
    ctx.mock_script_get(&script_fixture("adapter-2", "adapt();"))
        .await;
    ctx.mock_metadata(IDP, &metadata_fixture(IDP)).await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("idp.saml.json");
    let reporter = RecordingReporter::new();

    let written = saml::export_provider(&ctx.client(), &reporter, IDP, Some(&file))
        .await
        .unwrap();
    assert_eq!(written, file);

    let envelope = read_envelope(&file).unwrap();
    let meta = envelope.meta.expect("meta");
    assert_eq!(meta.origin.as_deref(), Some(ctx.tenant().as_str()));
    assert_eq!(meta.export_tool.as_deref(), Some("idcloud-cli"));

    let id64 = encode_entity_id(IDP);
    assert!(envelope.saml.hosted.contains_key(&id64));
    assert!(envelope.saml.remote.is_empty());
    assert_eq!(envelope.saml.metadata[&id64].len(), 3);

    assert_eq!(
        envelope.script["mapper-1"].script,
        ScriptBody::Lines(vec!["var a = 1;".into(), "map(a);".into()])
    );
    assert_eq!(
        envelope.script["adapter-2"].script,
        ScriptBody::Lines(vec!["adapt();".into()])
    );

    let (status, message) = reporter.last_stop().unwrap();
    assert_eq!(status, ProgressStatus::Success);
    assert!(message.contains(IDP));
}

#[tokio::test]
async fn test_export_provider_not_found() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_find(IDP, vec![]).await;
    forbid_fetch_by_location(&ctx).await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("idp.saml.json");
    let reporter = RecordingReporter::new();

    let result = saml::export_provider(&ctx.client(), &reporter, IDP, Some(&file)).await;

    assert!(matches!(result, Err(CliError::NotFound(_))));
    assert!(!file.exists());
    assert_eq!(reporter.last_stop().unwrap().0, ProgressStatus::Fail);
}

#[tokio::test]
async fn test_export_metadata_writes_xml() {
    let ctx = TestContext::new().await;
    ctx.mock_metadata(SP, &metadata_fixture(SP)).await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("sp.metadata.xml");
    let reporter = RecordingReporter::new();

    saml::export_metadata(&ctx.client(), &reporter, SP, Some(&file))
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&file).unwrap(), metadata_fixture(SP));
}

#[tokio::test]
async fn test_export_all_to_one_file() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_list(vec![
        stub_fixture(IDP, "hosted", &["identityProvider"]),
        stub_fixture(SP, "remote", &["serviceProvider"]),
    ])
    .await;
    ctx.mock_provider_get("hosted", &hosted_idp_fixture(IDP, Some("shared"), Some("shared")))
        .await;
    ctx.mock_provider_get("remote", &remote_sp_fixture(SP)).await;
    ctx.mock_script_get(&script_fixture("shared", "shared();"))
        .await;
    ctx.mock_metadata(IDP, &metadata_fixture(IDP)).await;
    ctx.mock_metadata(SP, &metadata_fixture(SP)).await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("allAlphaProviders.saml.json");
    let reporter = RecordingReporter::new();

    saml::export_providers_to_file(&ctx.client(), &reporter, Some(&file))
        .await
        .unwrap();

    let envelope = read_envelope(&file).unwrap();
    assert_eq!(envelope.saml.len(), 2);
    assert_eq!(
        envelope.saml.locate(&encode_entity_id(SP)),
        Some(ProviderLocation::Remote)
    );
    assert!(envelope.saml.metadata.contains_key(&encode_entity_id(SP)));
    assert_eq!(envelope.script.len(), 1);
    assert_eq!(reporter.updates().len(), 2);

    // the shared script is fetched once
    let fetched = ctx
        .received("GET", &format!("{}/scripts/shared", common::REALM_BASE))
        .await;
    assert_eq!(fetched.len(), 1);
}

#[tokio::test]
async fn test_export_all_to_separate_files() {
    let ctx = TestContext::new().await;
    ctx.mock_provider_list(vec![
        stub_fixture(IDP, "hosted", &["identityProvider"]),
        stub_fixture(SP, "remote", &["serviceProvider"]),
    ])
    .await;
    ctx.mock_provider_get("hosted", &hosted_idp_fixture(IDP, None, None))
        .await;
    ctx.mock_provider_get("remote", &remote_sp_fixture(SP)).await;
    ctx.mock_metadata(IDP, &metadata_fixture(IDP)).await;
    ctx.mock_metadata(SP, &metadata_fixture(SP)).await;

    let dir = TempDir::new().unwrap();
    let reporter = RecordingReporter::new();

    let files = saml::export_providers_to_files(&ctx.client(), &reporter, dir.path())
        .await
        .unwrap();

    assert_eq!(files.len(), 2);
    assert!(dir.path().join("urn_example_idp.saml.json").exists());
    assert!(dir.path().join("https___sp.example.com_saml.saml.json").exists());

    let sp = read_envelope(&dir.path().join("https___sp.example.com_saml.saml.json")).unwrap();
    assert_eq!(sp.saml.remote.len(), 1);
    assert!(sp.saml.hosted.is_empty());
}
