//! Base64 conversions used by export files
//!
//! Provider IDs are the unpadded base64 form of the entity ID. Script bodies
//! travel as one base64 string through the API and as an array of text lines
//! in export files, so diffs stay readable. Metadata for remote providers is
//! sent as base64url.

use crate::error::{CliError, CliResult};
use base64::alphabet;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// Standard alphabet, accepts input with or without padding
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// URL-safe alphabet, accepts input with or without padding
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode an entity ID into the provider `_id` form
pub fn encode_entity_id(entity_id: &str) -> String {
    STANDARD_NO_PAD.encode(entity_id.as_bytes())
}

/// Decode a provider `_id` back into its entity ID
pub fn decode_entity_id(id64: &str) -> CliResult<String> {
    decode_utf8(&STANDARD_LENIENT, id64, "provider id")
}

/// Encode text as padded standard base64
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode standard base64 into text
pub fn decode_text(b64: &str) -> CliResult<String> {
    decode_utf8(&STANDARD_LENIENT, b64, "base64 text")
}

/// Encode text as unpadded base64url
pub fn encode_text_url(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Decode base64url into text
pub fn decode_text_url(b64: &str) -> CliResult<String> {
    decode_utf8(&URL_SAFE_LENIENT, b64, "base64url text")
}

/// Split text into lines on `\n`
///
/// Empty text yields a single empty line so that joining restores it.
pub fn text_to_lines(text: &str) -> Vec<String> {
    text.split('\n').map(String::from).collect()
}

/// Join lines with `\n`
pub fn lines_to_text(lines: &[String]) -> String {
    lines.join("\n")
}

/// Base64 string (API form) to line array (file form)
pub fn base64_to_lines(b64: &str) -> CliResult<Vec<String>> {
    Ok(text_to_lines(&decode_text(b64)?))
}

/// Line array (file form) to base64 string (API form)
pub fn lines_to_base64(lines: &[String]) -> String {
    encode_text(&lines_to_text(lines))
}

/// Base64url string to line array
pub fn base64url_to_lines(b64: &str) -> CliResult<Vec<String>> {
    Ok(text_to_lines(&decode_text_url(b64)?))
}

/// Line array to base64url string
pub fn lines_to_base64url(lines: &[String]) -> String {
    encode_text_url(&lines_to_text(lines))
}

fn decode_utf8(engine: &GeneralPurpose, input: &str, what: &str) -> CliResult<String> {
    let bytes = engine
        .decode(input.trim())
        .map_err(|e| CliError::Validation(format!("invalid {what} '{input}': {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| CliError::Validation(format!("{what} is not valid UTF-8: {e}")))
}
