//! Tenant log operations

use crate::api::{logs as logs_api, ApiClient};
use crate::error::{CliError, CliResult};
use crate::models::logs::{LogApiKey, LogEvent};
use crate::output::Reporter;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Delay between polls when following a log source
pub const FOLLOW_INTERVAL: Duration = Duration::from_secs(5);

/// Print available log sources, one per line
pub async fn list_sources(client: &ApiClient, reporter: &dyn Reporter) -> CliResult<Vec<String>> {
    let sources = logs_api::get_sources(client).await?.result;
    for source in &sources {
        reporter.data(source);
    }
    Ok(sources)
}

/// Fetch and print one page of events
///
/// Returns the number of events printed and the cookie for the next page.
pub async fn tail_page(
    client: &ApiClient,
    reporter: &dyn Reporter,
    source: &str,
    cookie: Option<&str>,
) -> CliResult<(usize, Option<String>)> {
    let page = logs_api::tail(client, source, cookie).await?;
    for event in &page.result {
        reporter.data(&event_line(event)?);
    }
    debug!(source, events = page.len(), "log page");
    Ok((page.len(), page.paged_results_cookie))
}

/// Print recent events; with `follow`, keep polling until interrupted
pub async fn tail(
    client: &ApiClient,
    reporter: &dyn Reporter,
    source: &str,
    follow: Option<Duration>,
) -> CliResult<usize> {
    let (mut total, mut cookie) = tail_page(client, reporter, source, None).await?;

    let Some(interval) = follow else {
        return Ok(total);
    };
    loop {
        sleep(interval).await;
        let (count, next) = tail_page(client, reporter, source, cookie.as_deref()).await?;
        total += count;
        // An empty page carries no cookie; keep the last one
        if next.is_some() {
            cookie = next;
        }
    }
}

/// List log API keys as a table
pub async fn list_api_keys(client: &ApiClient, reporter: &dyn Reporter) -> CliResult<Vec<LogApiKey>> {
    let keys = logs_api::get_api_keys(client).await?.result;
    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|k| {
            vec![
                k.name.clone(),
                k.id.clone(),
                k.created_at.clone().unwrap_or_default(),
            ]
        })
        .collect();
    reporter.table(&["Name", "Id", "Created"], &rows);
    Ok(keys)
}

/// Create a log API key and print its id and secret
///
/// The secret cannot be retrieved again later.
pub async fn create_api_key(
    client: &ApiClient,
    reporter: &dyn Reporter,
    name: &str,
) -> CliResult<LogApiKey> {
    if name.trim().is_empty() {
        return Err(CliError::Validation("key name must not be empty".into()));
    }
    let key = logs_api::create_api_key(client, name).await?;

    reporter.info(&format!("Created log API key '{}'. Store the secret now; it is not shown again.", key.name));
    if let Some(id) = &key.api_key_id {
        reporter.data(&format!("api_key_id: {id}"));
    }
    if let Some(secret) = &key.api_key_secret {
        reporter.data(&format!("api_key_secret: {secret}"));
    }
    Ok(key)
}

/// One output line per event: text payloads as-is, JSON payloads compact
fn event_line(event: &LogEvent) -> CliResult<String> {
    Ok(match &event.payload {
        Value::String(text) => text.clone(),
        other => serde_json::to_string(other)?,
    })
}
