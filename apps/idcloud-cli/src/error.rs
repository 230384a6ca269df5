//! CLI error types and exit codes

use thiserror::Error;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Authentication required
/// - 3: Network error
/// - 4: Validation error / lookup failure
/// - 5: Server error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Not authenticated. Provide credentials with --username/--password or IDCLOUD_* variables.")]
    NotAuthenticated,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Connection failed: {0}\n\nTroubleshooting:\n  - Check your internet connection\n  - Verify the tenant URL is correct\n  - Try again in a few moments")]
    ConnectionFailed(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous: {0}")]
    Ambiguous(String),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Input error: {0}")]
    InputError(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotAuthenticated | CliError::AuthenticationFailed(_) => 2,
            CliError::Network(_) | CliError::ConnectionFailed(_) => 3,
            CliError::Validation(_) | CliError::NotFound(_) | CliError::Ambiguous(_) => 4,
            CliError::Api { status, .. } => {
                if *status >= 500 {
                    5
                } else if *status == 401 || *status == 403 {
                    2
                } else {
                    4
                }
            }
            CliError::Io(_) | CliError::Config(_) | CliError::InputError(_) => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::NotAuthenticated => {
                Some("Set IDCLOUD_USERNAME and IDCLOUD_PASSWORD, or pass --username/--password.")
            }
            CliError::ConnectionFailed(_) => Some("Check your network connection and try again."),
            CliError::Ambiguous(_) => Some("Use the exact entity ID shown by 'idcloud saml list'."),
            CliError::Api { status: 401, .. } | CliError::Api { status: 403, .. } => {
                Some("Check that the account has tenant administrator privileges.")
            }
            _ => None,
        }
    }

    /// Platform error code carried by an API rejection, if any
    pub fn api_code(&self) -> Option<i64> {
        match self {
            CliError::Api { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            CliError::ConnectionFailed(e.to_string())
        } else if e.is_timeout() {
            CliError::Network("Request timed out".to_string())
        } else {
            CliError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(format!("JSON error: {}", e))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::InputError(format!("Dialog error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_not_authenticated() {
        assert_eq!(CliError::NotAuthenticated.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_network_error() {
        assert_eq!(CliError::Network("test".to_string()).exit_code(), 3);
    }

    #[test]
    fn test_exit_code_lookup_failures() {
        assert_eq!(CliError::NotFound("x".to_string()).exit_code(), 4);
        assert_eq!(CliError::Ambiguous("x".to_string()).exit_code(), 4);
        assert_eq!(CliError::Validation("x".to_string()).exit_code(), 4);
    }

    #[test]
    fn test_exit_code_api_error_5xx() {
        let error = CliError::Api {
            status: 500,
            code: Some(500),
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(error.exit_code(), 5);
    }

    #[test]
    fn test_exit_code_api_error_403() {
        let error = CliError::Api {
            status: 403,
            code: None,
            message: "Forbidden".to_string(),
        };
        assert_eq!(error.exit_code(), 2);
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_api_code() {
        let error = CliError::Api {
            status: 409,
            code: Some(409),
            message: "Conflict".to_string(),
        };
        assert_eq!(error.api_code(), Some(409));
        assert_eq!(CliError::NotAuthenticated.api_code(), None);
    }

    #[test]
    fn test_error_display_api() {
        let error = CliError::Api {
            status: 400,
            code: Some(400),
            message: "Bad Request".to_string(),
        };
        assert_eq!(error.to_string(), "API error (status 400): Bad Request");
    }
}
