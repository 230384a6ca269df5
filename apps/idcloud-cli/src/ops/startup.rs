//! Pending secret/variable updates and tenant restarts
//!
//! Changes to secrets and variables only take effect after the tenant
//! restarts. A restart moves through `restarting` back to `ready`; with
//! `wait` the status is polled until it does or the policy ceiling passes.

use super::finish;
use crate::api::{managed, secrets, startup, variables, ApiClient};
use crate::error::CliResult;
use crate::models::esv::{EsvEntry, EsvKind, PendingUpdate, STATUS_READY};
use crate::output::Reporter;
use chrono::Local;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Confirmation shown before a restart
pub const APPLY_QUESTION: &str = "Changes may take up to 10 minutes to propagate, during which time you will not be able to make further updates.\n\nApply updates?";

/// Polling cadence and ceiling for restart status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(10 * 60),
        }
    }
}

/// Flags for [`apply_updates`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Restart even when nothing is pending
    pub force: bool,
    /// Poll until the restart completes
    pub wait: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// How an apply run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Nothing pending and not forced
    NoUpdates,
    /// The user answered no
    Declined,
    /// Restart started, not waited for
    Initiated,
    /// Restart reached `ready`
    Applied { elapsed_secs: u64, status: String },
    /// The ceiling passed before `ready`
    TimedOut { elapsed_secs: u64, status: String },
}

/// Secrets and variables whose latest change has not been loaded yet
///
/// Secrets come first, then variables, each in API order.
pub async fn pending_updates(client: &ApiClient) -> CliResult<Vec<PendingUpdate>> {
    let secrets = secrets::get_secrets(client).await?.result;
    let variables = variables::get_variables(client).await?.result;

    let mut names: HashMap<String, String> = HashMap::new();
    let mut updates = Vec::new();

    let entries = secrets
        .into_iter()
        .map(|e| (EsvKind::Secret, e))
        .chain(variables.into_iter().map(|e| (EsvKind::Variable, e)));

    for (kind, entry) in entries.filter(|(_, e)| !e.loaded) {
        let modifier = match &entry.last_changed_by {
            Some(id) => resolve_user_name(client, id, &mut names).await,
            None => String::new(),
        };
        updates.push(to_pending(kind, entry, modifier));
    }
    Ok(updates)
}

/// Print pending updates as a table; returns whether any exist
pub async fn check_for_updates(client: &ApiClient, reporter: &dyn Reporter) -> CliResult<bool> {
    reporter.start_progress(None, "Checking for updates to apply...");
    let updates = finish(
        reporter,
        pending_updates(client).await,
        "Error checking for updates",
        |updates| match updates.len() {
            0 => "No updates need to be applied".to_string(),
            n => format!("{n} update(s) need to be applied"),
        },
    )?;

    if updates.is_empty() {
        return Ok(false);
    }

    let rows: Vec<Vec<String>> = updates
        .into_iter()
        .map(|u| vec![u.kind.label().to_string(), u.name, u.modified, u.modifier])
        .collect();
    reporter.table(&["Type", "Name", "Modified", "Modifier"], &rows);
    Ok(true)
}

/// Apply pending updates by restarting the tenant
pub async fn apply_updates(
    client: &ApiClient,
    reporter: &dyn Reporter,
    options: ApplyOptions,
    policy: RestartPolicy,
) -> CliResult<ApplyOutcome> {
    let pending = check_for_updates(client, reporter).await?;
    if !pending && !options.force {
        return Ok(ApplyOutcome::NoUpdates);
    }

    if !options.yes && !reporter.confirm(APPLY_QUESTION)? {
        return Ok(ApplyOutcome::Declined);
    }

    reporter.start_progress(None, "Applying updates...");
    let result = restart(client, reporter, options.wait, policy).await;

    finish(reporter, result, "Error applying updates", |outcome| match outcome {
        ApplyOutcome::Applied { elapsed_secs, status } => {
            format!("Updates applied in {elapsed_secs}s with final status: {status}")
        }
        ApplyOutcome::TimedOut { elapsed_secs, status } => {
            format!("Updates timed out after {elapsed_secs}s with final status: {status}")
        }
        _ => "Updates are being applied. Changes may take up to 10 minutes to propagate, during which time you will not be able to make further updates.".to_string(),
    })
}

async fn restart(
    client: &ApiClient,
    reporter: &dyn Reporter,
    wait: bool,
    policy: RestartPolicy,
) -> CliResult<ApplyOutcome> {
    startup::initiate_restart(client).await?;
    if !wait {
        return Ok(ApplyOutcome::Initiated);
    }

    let start = Instant::now();
    let mut status = startup::get_status(client).await?;
    while !status.is_ready() && start.elapsed() < policy.timeout {
        sleep(policy.interval).await;
        status = startup::get_status(client).await?;
        let elapsed = start.elapsed().as_secs_f64().round() as u64;
        debug!(status = %status.restart_status, elapsed, "restart status");
        reporter.update_progress(&format!("{} ({elapsed}s)", status.restart_status));
    }

    let elapsed_secs = start.elapsed().as_secs_f64().round() as u64;
    let status = status.restart_status;
    if status == STATUS_READY {
        Ok(ApplyOutcome::Applied {
            elapsed_secs,
            status,
        })
    } else {
        warn!(elapsed_secs, %status, "restart did not complete in time");
        Ok(ApplyOutcome::TimedOut {
            elapsed_secs,
            status,
        })
    }
}

/// Display name for a team member, cached per run
///
/// Falls back to the raw ID when the lookup fails.
async fn resolve_user_name(
    client: &ApiClient,
    id: &str,
    cache: &mut HashMap<String, String>,
) -> String {
    if let Some(name) = cache.get(id) {
        return name.clone();
    }
    let name = match managed::get_team_member(client, id).await {
        Ok(member) => member.display_name().unwrap_or_else(|| id.to_string()),
        Err(e) => {
            debug!(id, error = %e, "could not resolve user name");
            id.to_string()
        }
    };
    cache.insert(id.to_string(), name.clone());
    name
}

fn to_pending(kind: EsvKind, entry: EsvEntry, modifier: String) -> PendingUpdate {
    PendingUpdate {
        kind,
        name: entry.id,
        modified: entry
            .last_change_date
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        modifier,
    }
}
