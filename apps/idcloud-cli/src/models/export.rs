//! Export file envelope

use super::saml::{EntityProvider, ProviderLocation};
use super::script::ScriptRecord;
use super::session::Session;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provenance block written at the top of every export file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_am_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_tool: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_tool_version: Option<String>,
}

impl ExportMeta {
    /// Provenance for a file exported through `session`
    pub fn new(session: &Session) -> Self {
        Self {
            origin: Some(session.tenant.clone()),
            origin_am_version: session.am_version.clone(),
            exported_by: session.username.clone(),
            export_date: Some(Utc::now().to_rfc3339()),
            export_tool: Some(env!("CARGO_PKG_NAME").to_string()),
            export_tool_version: Some(session.tool_version.clone()),
        }
    }
}

/// SAML section of an export file
///
/// Providers and metadata are keyed by the provider's `_id`. Metadata is
/// only present for remote providers and is stored as lines of XML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamlExport {
    #[serde(default)]
    pub hosted: BTreeMap<String, EntityProvider>,

    #[serde(default)]
    pub remote: BTreeMap<String, EntityProvider>,

    #[serde(default)]
    pub metadata: BTreeMap<String, Vec<String>>,
}

impl SamlExport {
    pub fn providers(&self, location: ProviderLocation) -> &BTreeMap<String, EntityProvider> {
        match location {
            ProviderLocation::Hosted => &self.hosted,
            ProviderLocation::Remote => &self.remote,
        }
    }

    pub fn providers_mut(
        &mut self,
        location: ProviderLocation,
    ) -> &mut BTreeMap<String, EntityProvider> {
        match location {
            ProviderLocation::Hosted => &mut self.hosted,
            ProviderLocation::Remote => &mut self.remote,
        }
    }

    /// Add a provider under its `_id`
    pub fn insert(&mut self, location: ProviderLocation, provider: EntityProvider) {
        self.providers_mut(location)
            .insert(provider.id.clone(), provider);
    }

    /// Namespace holding `id64`; hosted wins when both do
    pub fn locate(&self, id64: &str) -> Option<ProviderLocation> {
        ProviderLocation::ALL
            .into_iter()
            .find(|loc| self.providers(*loc).contains_key(id64))
    }

    /// First provider in the file, hosted before remote
    pub fn first(&self) -> Option<(ProviderLocation, &EntityProvider)> {
        self.entries().into_iter().next()
    }

    /// All providers, hosted first, each namespace in key order
    pub fn entries(&self) -> Vec<(ProviderLocation, &EntityProvider)> {
        ProviderLocation::ALL
            .into_iter()
            .flat_map(|loc| self.providers(loc).values().map(move |p| (loc, p)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hosted.len() + self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level export file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ExportMeta>,

    /// Scripts referenced by the providers, keyed by script ID
    #[serde(default)]
    pub script: BTreeMap<String, ScriptRecord>,

    #[serde(default)]
    pub saml: SamlExport,
}

impl ExportEnvelope {
    /// Empty envelope stamped with provenance from `session`
    pub fn new(session: &Session) -> Self {
        Self {
            meta: Some(ExportMeta::new(session)),
            ..Self::default()
        }
    }
}
