//! Environment secret/variable (ESV) and restart models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Restart status reported once the tenant has converged
pub const STATUS_READY: &str = "ready";

/// A secret or variable entry
///
/// `loaded` is false while a change has not yet been applied by a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsvEntry {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub loaded: bool,

    #[serde(default)]
    pub last_change_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_changed_by: Option<String>,
}

/// Kind of ESV entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EsvKind {
    Secret,
    Variable,
}

impl EsvKind {
    pub fn label(&self) -> &'static str {
        match self {
            EsvKind::Secret => "secret",
            EsvKind::Variable => "variable",
        }
    }
}

/// A pending change, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub kind: EsvKind,
    pub name: String,
    pub modified: String,
    pub modifier: String,
}

/// Response of the startup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartStatus {
    pub restart_status: String,
}

impl RestartStatus {
    pub fn is_ready(&self) -> bool {
        self.restart_status == STATUS_READY
    }
}

/// Tenant administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub given_name: Option<String>,

    #[serde(default)]
    pub sn: Option<String>,
}

impl TeamMember {
    /// `Given Surname (userName)`, or whatever subset is known
    pub fn display_name(&self) -> Option<String> {
        let full: Vec<&str> = [self.given_name.as_deref(), self.sn.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        match (full.is_empty(), self.user_name.as_deref()) {
            (false, Some(user)) => Some(format!("{} ({})", full.join(" "), user)),
            (false, None) => Some(full.join(" ")),
            (true, Some(user)) => Some(user.to_string()),
            (true, None) => None,
        }
    }
}
