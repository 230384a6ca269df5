//! SAML2 entity provider models

use crate::error::CliResult;
use crate::formats::encoding;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Script reference value meaning "no script configured"
pub const EMPTY_SCRIPT: &str = "[Empty]";

const ATTRIBUTE_MAPPER_PATH: [&str; 4] = [
    "identityProvider",
    "assertionProcessing",
    "attributeMapper",
    "attributeMapperScript",
];

const IDP_ADAPTER_PATH: [&str; 4] = [
    "identityProvider",
    "advanced",
    "idpAdapter",
    "idpAdapterScript",
];

/// Where a provider's configuration lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderLocation {
    /// Provider hosted by this tenant
    Hosted,
    /// Provider imported from partner metadata
    Remote,
}

impl ProviderLocation {
    pub const ALL: [ProviderLocation; 2] = [ProviderLocation::Hosted, ProviderLocation::Remote];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderLocation::Hosted => "hosted",
            ProviderLocation::Remote => "remote",
        }
    }
}

impl fmt::Display for ProviderLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a role key, e.g. `identityProvider` -> `IDP`
pub fn role_label(role: &str) -> &str {
    match role {
        "identityProvider" => "IDP",
        "serviceProvider" => "SP",
        "attributeQueryProvider" => "AttrQuery",
        "xacmlPolicyEnforcementPoint" => "XACML PEP",
        other => other,
    }
}

/// Entry returned by provider queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStub {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub entity_id: String,

    pub location: ProviderLocation,

    #[serde(default)]
    pub roles: Vec<String>,
}

impl ProviderStub {
    /// Role labels joined for display
    pub fn role_labels(&self) -> String {
        self.roles
            .iter()
            .map(|r| role_label(r))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Script IDs referenced by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptRefs {
    pub attribute_mapper: Option<String>,
    pub idp_adapter: Option<String>,
}

impl ScriptRefs {
    /// Referenced IDs in dependency order, duplicates removed
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in [&self.attribute_mapper, &self.idp_adapter].into_iter().flatten() {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.attribute_mapper.is_none() && self.idp_adapter.is_none()
    }
}

/// Full provider record as returned by the realm config endpoint
///
/// Only the identifying fields are typed; the rest of the configuration is
/// carried as-is so it survives an export/import unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProvider {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl EntityProvider {
    /// Entity ID, decoded from `_id` when the record omits it
    pub fn entity_id(&self) -> CliResult<String> {
        match &self.entity_id {
            Some(id) => Ok(id.clone()),
            None => encoding::decode_entity_id(&self.id),
        }
    }

    /// Script IDs referenced by this provider; `[Empty]` counts as none
    pub fn script_refs(&self) -> ScriptRefs {
        ScriptRefs {
            attribute_mapper: self.script_ref(&ATTRIBUTE_MAPPER_PATH),
            idp_adapter: self.script_ref(&IDP_ADAPTER_PATH),
        }
    }

    /// Role keys present in the configuration
    pub fn roles(&self) -> Vec<String> {
        [
            "identityProvider",
            "serviceProvider",
            "attributeQueryProvider",
            "xacmlPolicyEnforcementPoint",
        ]
        .into_iter()
        .filter(|r| self.config.contains_key(*r))
        .map(String::from)
        .collect()
    }

    fn script_ref(&self, path: &[&str]) -> Option<String> {
        let (first, rest) = path.split_first()?;
        let mut node = self.config.get(*first)?;
        for key in rest {
            node = node.get(*key)?;
        }
        match node.as_str() {
            Some(id) if !id.is_empty() && id != EMPTY_SCRIPT => Some(id.to_string()),
            _ => None,
        }
    }
}
