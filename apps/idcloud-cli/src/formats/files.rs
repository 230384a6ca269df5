//! Reading and writing export files

use super::FileKind;
use crate::error::{CliError, CliResult};
use crate::models::{ExportEnvelope, ExportMeta};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Characters not allowed in file names on common platforms
const RESERVED: &[char] = &['/', '?', '<', '>', '\\', ':', '*', '|', '"'];

/// Make a name safe to use as a file name
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Default file name for an object, e.g. `my_idp.saml.json`
pub fn typed_filename(name: &str, kind: FileKind) -> String {
    format!("{}{}", sanitize_file_name(name), kind.suffix())
}

/// Write `value` as pretty-printed JSON with a trailing newline
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    save_text(path, &content)
}

/// Write text, creating parent directories
pub fn save_text(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| CliError::Io(format!("{}: {e}", parent.display())))?;
        }
    }
    fs::write(path, content).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Read and parse an export file
///
/// A file that is not a JSON export envelope is a validation error.
pub fn read_envelope(path: &Path) -> CliResult<ExportEnvelope> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::Validation(format!("{} is not a valid export file: {e}", path.display()))
    })
}

/// Check the provenance block of an export file
///
/// The block must be present and name the origin tenant and the exporting
/// tool.
pub fn validate_import(meta: Option<&ExportMeta>) -> CliResult<()> {
    let meta = meta.ok_or_else(|| CliError::Validation("export file has no meta block".into()))?;

    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !present(&meta.origin) {
        return Err(CliError::Validation("export meta is missing 'origin'".into()));
    }
    if !present(&meta.export_tool) {
        return Err(CliError::Validation(
            "export meta is missing 'exportTool'".into(),
        ));
    }
    Ok(())
}

/// Files of `kind` directly inside `dir`, sorted by name
pub fn list_files(dir: &Path, kind: FileKind) -> CliResult<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).map_err(|e| CliError::Io(format!("{}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && kind.matches(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid_meta() -> ExportMeta {
        ExportMeta {
            origin: Some("https://t.example.com/am".into()),
            export_tool: Some("idcloud-cli".into()),
            ..ExportMeta::default()
        }
    }

    #[test]
    fn test_typed_filename_sanitizes() {
        assert_eq!(
            typed_filename("https://sp.example.com/saml", FileKind::Saml),
            "https___sp.example.com_saml.saml.json"
        );
        assert_eq!(typed_filename("urn:idp", FileKind::Metadata), "urn_idp.metadata.xml");
        assert_eq!(typed_filename("", FileKind::Saml), "_.saml.json");
    }

    #[test]
    fn test_validate_import() {
        assert!(validate_import(Some(&valid_meta())).is_ok());
        assert!(matches!(validate_import(None), Err(CliError::Validation(_))));

        let mut meta = valid_meta();
        meta.origin = Some("  ".into());
        assert!(validate_import(Some(&meta)).is_err());

        let mut meta = valid_meta();
        meta.export_tool = None;
        assert!(validate_import(Some(&meta)).is_err());
    }

    #[test]
    fn test_save_and_read_envelope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("x.saml.json");
        let envelope = ExportEnvelope {
            meta: Some(valid_meta()),
            ..ExportEnvelope::default()
        };

        save_json(&path, &envelope).unwrap();
        let read = read_envelope(&path).unwrap();
        assert_eq!(read.meta, envelope.meta);
        assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
    }

    #[test]
    fn test_read_envelope_rejects_non_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.saml.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(read_envelope(&path), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_list_files_filters_by_suffix() {
        let dir = TempDir::new().unwrap();
        for name in ["b.saml.json", "A.SAML.JSON", "c.json", "d.metadata.xml"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("sub.saml.json")).unwrap();

        let files = list_files(dir.path(), FileKind::Saml).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.SAML.JSON", "b.saml.json"]);
    }
}
