//! Export file handling
//!
//! - `encoding`: base64 conversions for IDs, scripts and metadata
//! - `files`: file naming, reading and writing of export files

pub mod encoding;
pub mod files;

use std::path::Path;

/// Kind of file written by export commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// SAML export envelope (`.saml.json`)
    Saml,
    /// Raw provider metadata (`.metadata.xml`)
    Metadata,
}

impl FileKind {
    /// Type segment of the file name
    pub fn type_name(&self) -> &'static str {
        match self {
            FileKind::Saml => "saml",
            FileKind::Metadata => "metadata",
        }
    }

    /// File extension
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Saml => "json",
            FileKind::Metadata => "xml",
        }
    }

    /// Full suffix including both dots, e.g. `.saml.json`
    pub fn suffix(&self) -> String {
        format!(".{}.{}", self.type_name(), self.extension())
    }

    /// Whether a path carries this kind's suffix (case-insensitive)
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_lowercase().ends_with(&self.suffix()))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
