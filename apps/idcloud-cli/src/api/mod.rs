//! API client modules for the identity platform
//!
//! Each module wraps one resource family. All requests go through
//! [`ApiClient`], which formats URLs from the session and maps rejections to
//! [`CliError::Api`](crate::error::CliError::Api).

pub mod auth;
mod client;
pub mod logs;
pub mod managed;
pub mod saml;
pub mod scripts;
pub mod secrets;
pub mod startup;
pub mod variables;

pub use client::{api_error, ApiClient, API_VERSION_HEADER};
