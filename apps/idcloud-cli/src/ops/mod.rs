//! Operations behind the CLI commands
//!
//! Operations take an authenticated [`ApiClient`](crate::api::ApiClient) and
//! a [`Reporter`]; they never print directly.

pub mod auth;
pub mod logs;
pub mod saml;
pub mod startup;

use crate::error::CliResult;
use crate::output::{ProgressStatus, Reporter};

/// Stop the progress indicator according to `result`
pub(crate) fn finish<T>(
    reporter: &dyn Reporter,
    result: CliResult<T>,
    failure: &str,
    success: impl FnOnce(&T) -> String,
) -> CliResult<T> {
    match &result {
        Ok(value) => reporter.stop_progress(ProgressStatus::Success, &success(value)),
        Err(_) => reporter.stop_progress(ProgressStatus::Fail, failure),
    }
    result
}
