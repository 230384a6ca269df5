//! Script records embedded in export files

use crate::error::CliResult;
use crate::formats::encoding;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Script body in either of its two shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptBody {
    /// Single base64 string, as the API returns it
    Encoded(String),
    /// Decoded text split into lines, as export files store it
    Lines(Vec<String>),
}

/// A script as fetched from the API, with its body in one of two shapes
///
/// Everything other than the body is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub script: ScriptBody,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScriptRecord {
    /// Script ID, if the record carries one
    pub fn id(&self) -> Option<&str> {
        self.fields.get("_id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Convert to the line-array form used in files
    pub fn into_file_form(self) -> CliResult<Self> {
        let script = match self.script {
            ScriptBody::Encoded(b64) => ScriptBody::Lines(encoding::base64_to_lines(&b64)?),
            lines => lines,
        };
        Ok(Self { script, ..self })
    }

    /// Convert to the single base64 string the API expects
    pub fn into_api_form(self) -> Self {
        let script = match self.script {
            ScriptBody::Lines(lines) => ScriptBody::Encoded(encoding::lines_to_base64(&lines)),
            encoded => encoded,
        };
        Self { script, ..self }
    }
}
