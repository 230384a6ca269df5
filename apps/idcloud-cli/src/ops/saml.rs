//! SAML entity provider operations
//!
//! Export gathers a provider, the scripts it references and its metadata
//! into one envelope. Import replays an envelope: scripts first, then the
//! provider itself.

use super::finish;
use crate::api::{saml as saml_api, scripts as scripts_api, ApiClient};
use crate::batch::BatchResult;
use crate::error::{CliError, CliResult};
use crate::formats::encoding::{
    decode_entity_id, encode_entity_id, lines_to_base64url, text_to_lines,
};
use crate::formats::files::{
    list_files, read_envelope, save_json, save_text, typed_filename, validate_import,
};
use crate::formats::FileKind;
use crate::models::saml::role_label;
use crate::models::{
    EntityProvider, ExportEnvelope, ProviderLocation, ProviderStub, ScriptRecord,
};
use crate::output::{flatten_json, ProgressStatus, Reporter};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fields requested when only the location is needed
const EXPORT_FIELDS: &str = "location";
const DESCRIBE_FIELDS: &str = "location,roles";

// =============================================================================
// List / describe
// =============================================================================

/// List providers sorted by `_id`
///
/// The short form prints one entity ID per line; the long form prints a
/// table with location and role labels.
pub async fn list_providers(
    client: &ApiClient,
    reporter: &dyn Reporter,
    long: bool,
) -> CliResult<Vec<ProviderStub>> {
    let mut providers = saml_api::get_providers(client).await?.result;
    providers.sort_by(|a, b| a.id.cmp(&b.id));

    if long {
        let rows: Vec<Vec<String>> = providers
            .iter()
            .map(|p| vec![p.entity_id.clone(), p.location.to_string(), p.role_labels()])
            .collect();
        reporter.table(&["Entity Id", "Location", "Role(s)"], &rows);
    } else {
        for provider in &providers {
            reporter.data(&provider.entity_id);
        }
    }
    Ok(providers)
}

/// Print a provider's configuration as a key/value table
///
/// Returns the displayed record: the provider without `_id`/`_rev`, plus its
/// location, role labels and metadata URL.
pub async fn describe_provider(
    client: &ApiClient,
    reporter: &dyn Reporter,
    entity_id: &str,
) -> CliResult<Value> {
    let stub = find_single_provider(client, entity_id, DESCRIBE_FIELDS).await?;
    let id64 = encode_entity_id(entity_id);
    let provider = saml_api::get_provider_by_location_and_id(client, stub.location, &id64).await?;

    let mut value = serde_json::to_value(&provider)?;
    if let Value::Object(map) = &mut value {
        map.remove("_id");
        map.remove("_rev");
        map.insert("location".into(), Value::from(stub.location.as_str()));
        map.insert(
            "roles".into(),
            Value::from(stub.roles.iter().map(|r| role_label(r)).collect::<Vec<_>>()),
        );
        map.insert(
            "metadataUrl".into(),
            Value::from(saml_api::get_provider_metadata_url(client, entity_id)),
        );
    }

    let rows: Vec<Vec<String>> = flatten_json(&value)
        .into_iter()
        .map(|(k, v)| vec![k, v])
        .collect();
    reporter.table(&["Key", "Value"], &rows);
    Ok(value)
}

/// Locate exactly one provider by entity ID
///
/// Zero matches is [`CliError::NotFound`], more than one is
/// [`CliError::Ambiguous`].
pub async fn find_single_provider(
    client: &ApiClient,
    entity_id: &str,
    fields: &str,
) -> CliResult<ProviderStub> {
    let filter = saml_api::entity_id_filter(entity_id);
    let mut found = saml_api::find_providers(client, &filter, fields).await?.result;
    debug!(entity_id, matches = found.len(), "provider lookup");

    match found.len() {
        0 => Err(CliError::NotFound(format!(
            "no SAML entity provider with entity ID '{entity_id}'"
        ))),
        1 => Ok(found.remove(0)),
        n => Err(CliError::Ambiguous(format!(
            "{n} SAML entity providers match entity ID '{entity_id}'"
        ))),
    }
}

// =============================================================================
// Export
// =============================================================================

/// Export one provider with its scripts and metadata
pub async fn export_provider(
    client: &ApiClient,
    reporter: &dyn Reporter,
    entity_id: &str,
    file: Option<&Path>,
) -> CliResult<PathBuf> {
    let path = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(typed_filename(entity_id, FileKind::Saml)));

    reporter.start_progress(Some(1), &format!("Exporting {entity_id}..."));
    let result = async {
        let stub = find_single_provider(client, entity_id, EXPORT_FIELDS).await?;
        let mut envelope = ExportEnvelope::new(client.session());
        let id64 = encode_entity_id(entity_id);
        export_into(client, &mut envelope, stub.location, &id64, entity_id).await?;
        save_json(&path, &envelope)?;
        reporter.update_progress(&format!("Exported {entity_id}"));
        Ok::<_, CliError>(path)
    }
    .await;

    finish(reporter, result, &format!("Error exporting provider {entity_id}"), |p| {
        format!("Exported {entity_id} to {}.", p.display())
    })
}

/// Export a provider's raw metadata XML
pub async fn export_metadata(
    client: &ApiClient,
    reporter: &dyn Reporter,
    entity_id: &str,
    file: Option<&Path>,
) -> CliResult<PathBuf> {
    let path = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(typed_filename(entity_id, FileKind::Metadata)));

    reporter.start_progress(None, &format!("Exporting metadata for {entity_id}..."));
    let result = async {
        let metadata = saml_api::get_provider_metadata(client, entity_id).await?;
        save_text(&path, &metadata)?;
        Ok::<_, CliError>(path)
    }
    .await;

    finish(reporter, result, &format!("Error exporting metadata for {entity_id}"), |p| {
        format!("Exported metadata for {entity_id} to {}.", p.display())
    })
}

/// Export every provider in the realm into one file
pub async fn export_providers_to_file(
    client: &ApiClient,
    reporter: &dyn Reporter,
    file: Option<&Path>,
) -> CliResult<PathBuf> {
    let path = file.map(Path::to_path_buf).unwrap_or_else(|| {
        let name = format!("all{}Providers", client.session().realm_label());
        PathBuf::from(typed_filename(&name, FileKind::Saml))
    });

    let providers = saml_api::get_providers(client).await?.result;
    reporter.start_progress(Some(providers.len() as u64), "Exporting providers...");

    let result = async {
        let mut envelope = ExportEnvelope::new(client.session());
        for stub in &providers {
            let entity_id = stub_entity_id(stub)?;
            export_into(client, &mut envelope, stub.location, &stub.id, &entity_id).await?;
            reporter.update_progress(&format!("Exported {entity_id}"));
        }
        save_json(&path, &envelope)?;
        Ok::<_, CliError>(path)
    }
    .await;

    let count = providers.len();
    finish(reporter, result, "Error exporting providers", |p| {
        format!("Exported {count} provider(s) to {}.", p.display())
    })
}

/// Export every provider in the realm, one file each, into `dir`
pub async fn export_providers_to_files(
    client: &ApiClient,
    reporter: &dyn Reporter,
    dir: &Path,
) -> CliResult<Vec<PathBuf>> {
    let providers = saml_api::get_providers(client).await?.result;
    reporter.start_progress(Some(providers.len() as u64), "Exporting providers...");

    let result = async {
        let mut written = Vec::with_capacity(providers.len());
        for stub in &providers {
            let entity_id = stub_entity_id(stub)?;
            let mut envelope = ExportEnvelope::new(client.session());
            export_into(client, &mut envelope, stub.location, &stub.id, &entity_id).await?;

            let path = dir.join(typed_filename(&entity_id, FileKind::Saml));
            save_json(&path, &envelope)?;
            reporter.update_progress(&format!("Exported {entity_id}"));
            written.push(path);
        }
        Ok::<_, CliError>(written)
    }
    .await;

    finish(reporter, result, "Error exporting providers", |files| {
        format!("Exported {} provider(s) to {}.", files.len(), dir.display())
    })
}

/// Add one provider, its scripts and its metadata to `envelope`
async fn export_into(
    client: &ApiClient,
    envelope: &mut ExportEnvelope,
    location: ProviderLocation,
    id64: &str,
    entity_id: &str,
) -> CliResult<()> {
    let provider = saml_api::get_provider_by_location_and_id(client, location, id64).await?;

    let refs = provider.script_refs();
    for script_id in refs.ids() {
        if envelope.script.contains_key(script_id) {
            continue;
        }
        let script = scripts_api::get_script(client, script_id).await?.into_file_form()?;
        envelope.script.insert(script_id.to_string(), script);
    }

    let metadata = saml_api::get_provider_metadata(client, entity_id).await?;
    envelope
        .saml
        .metadata
        .insert(id64.to_string(), text_to_lines(&metadata));
    envelope.saml.insert(location, provider);
    debug!(entity_id, %location, scripts = refs.ids().len(), "provider exported");
    Ok(())
}

fn stub_entity_id(stub: &ProviderStub) -> CliResult<String> {
    if stub.entity_id.is_empty() {
        decode_entity_id(&stub.id)
    } else {
        Ok(stub.entity_id.clone())
    }
}

// =============================================================================
// Import
// =============================================================================

/// Import one provider, by entity ID, from an export file
pub async fn import_provider(
    client: &ApiClient,
    reporter: &dyn Reporter,
    entity_id: &str,
    file: &Path,
) -> CliResult<()> {
    let envelope = read_validated(file)?;
    let id64 = encode_entity_id(entity_id);

    reporter.start_progress(Some(1), "Importing provider...");
    let result = async {
        let location = envelope.saml.locate(&id64).ok_or_else(|| {
            CliError::NotFound(format!(
                "provider {entity_id} not found in {}",
                file.display()
            ))
        })?;
        let provider = envelope
            .saml
            .providers(location)
            .get(&id64)
            .ok_or_else(|| CliError::NotFound(format!("provider {entity_id}")))?;

        reporter.update_progress(&format!("Importing {entity_id}"));
        import_one(client, &envelope, location, provider).await?;
        Ok::<_, CliError>(())
    }
    .await;

    finish(reporter, result, &format!("Error importing provider {entity_id}"), |_| {
        format!("Successfully imported provider {entity_id}.")
    })
}

/// Import the first provider in an export file, hosted before remote
///
/// Returns the imported entity ID.
pub async fn import_first_provider(
    client: &ApiClient,
    reporter: &dyn Reporter,
    file: &Path,
) -> CliResult<String> {
    let envelope = read_validated(file)?;

    reporter.start_progress(Some(1), "Importing provider...");
    let result = async {
        let (location, provider) = envelope.saml.first().ok_or_else(|| {
            CliError::NotFound(format!("no providers found in {}", file.display()))
        })?;
        let entity_id = provider.entity_id()?;

        reporter.update_progress(&format!("Importing {entity_id}"));
        import_one(client, &envelope, location, provider).await?;
        Ok::<_, CliError>(entity_id)
    }
    .await;

    finish(reporter, result, "Error importing provider", |id| {
        format!("Successfully imported provider {id}.")
    })
}

/// Import every provider in an export file
///
/// A failing provider is reported and counted; the rest are still imported.
pub async fn import_providers_from_file(
    client: &ApiClient,
    reporter: &dyn Reporter,
    file: &Path,
) -> CliResult<BatchResult> {
    let envelope = read_validated(file)?;

    reporter.start_progress(Some(envelope.saml.len() as u64), "Importing providers...");
    let result = import_envelope(client, reporter, &envelope, true).await;

    let status = if result.has_failures() {
        ProgressStatus::Fail
    } else {
        ProgressStatus::Success
    };
    reporter.stop_progress(
        status,
        &format!(
            "Imported {} of {} provider(s).",
            result.success_count,
            result.attempted()
        ),
    );
    Ok(result)
}

/// Import every `*.saml.json` file in `dir`
///
/// Files that fail to parse or validate are reported and skipped without
/// any remote writes.
pub async fn import_providers_from_files(
    client: &ApiClient,
    reporter: &dyn Reporter,
    dir: &Path,
) -> CliResult<BatchResult> {
    let files = list_files(dir, FileKind::Saml)?;
    info!(dir = %dir.display(), files = files.len(), "importing export files");

    reporter.start_progress(Some(files.len() as u64), "Importing providers...");
    let mut total = BatchResult::new();

    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());

        match read_validated(file) {
            Ok(envelope) => {
                let result = import_envelope(client, reporter, &envelope, false).await;
                reporter.update_progress(&format!(
                    "Imported {} provider(s) from {name}",
                    result.success_count
                ));
                total.merge(result);
            }
            Err(e) => {
                reporter.error(&format!("Validation of {name} failed: {e}"));
                reporter.update_progress(&format!("Skipped {name}"));
                total.add_skipped(name, e.to_string());
            }
        }
    }

    let status = if total.has_failures() {
        ProgressStatus::Fail
    } else {
        ProgressStatus::Success
    };
    reporter.stop_progress(
        status,
        &format!(
            "Imported {} of {} provider(s) from {} file(s).",
            total.success_count,
            total.attempted(),
            files.len()
        ),
    );
    Ok(total)
}

/// Import all providers of one envelope, continuing past failures
///
/// `progress_per_item` advances the progress bar once per provider.
async fn import_envelope(
    client: &ApiClient,
    reporter: &dyn Reporter,
    envelope: &ExportEnvelope,
    progress_per_item: bool,
) -> BatchResult {
    let mut result = BatchResult::new();

    for (location, provider) in envelope.saml.entries() {
        let entity_id = provider
            .entity_id()
            .unwrap_or_else(|_| provider.id.clone());

        match import_one(client, envelope, location, provider).await {
            Ok(()) => {
                if progress_per_item {
                    reporter.update_progress(&format!("Imported {entity_id}"));
                }
                result.add_success(entity_id);
            }
            Err(e) => {
                reporter.error(&format!("Error importing provider {entity_id}: {e}"));
                if progress_per_item {
                    reporter.update_progress(&format!("Failed {entity_id}"));
                }
                result.add_failure(entity_id, e.to_string());
            }
        }
    }
    result
}

/// Import one provider: its scripts first, then the provider
async fn import_one(
    client: &ApiClient,
    envelope: &ExportEnvelope,
    location: ProviderLocation,
    provider: &EntityProvider,
) -> CliResult<()> {
    // Resolve everything from the file before the first write
    let scripts = dependencies(provider, envelope)?;
    let metadata = match location {
        ProviderLocation::Remote => {
            let lines = envelope.saml.metadata.get(&provider.id).ok_or_else(|| {
                CliError::Validation(format!(
                    "export file has no metadata for remote provider '{}'",
                    provider.id
                ))
            })?;
            Some(lines_to_base64url(lines))
        }
        ProviderLocation::Hosted => None,
    };

    for (script_id, record) in scripts {
        scripts_api::put_script(client, &script_id, &record).await?;
        debug!(%script_id, name = record.name().unwrap_or_default(), "script imported");
    }

    saml_api::create_provider(client, location, provider, metadata.as_deref()).await?;
    Ok(())
}

/// Scripts referenced by `provider`, in API form, keyed by their own IDs
fn dependencies(
    provider: &EntityProvider,
    envelope: &ExportEnvelope,
) -> CliResult<Vec<(String, ScriptRecord)>> {
    provider
        .script_refs()
        .ids()
        .into_iter()
        .map(|id| -> CliResult<(String, ScriptRecord)> {
            let record = envelope.script.get(id).ok_or_else(|| {
                CliError::Validation(format!(
                    "script '{id}' referenced by provider '{}' is missing from the export file",
                    provider.id
                ))
            })?;
            Ok((id.to_string(), record.clone().into_api_form()))
        })
        .collect()
}

fn read_validated(file: &Path) -> CliResult<ExportEnvelope> {
    let envelope = read_envelope(file)?;
    validate_import(envelope.meta.as_ref())?;
    Ok(envelope)
}
