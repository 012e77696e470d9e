//! Extraction of the delimited filename token from model output.

use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // (?s) lets the token span embedded line breaks.
    PATTERN.get_or_init(|| Regex::new(r"(?s)<filename>(.*?)</filename>").expect("valid regex"))
}

/// Extract the text enclosed by the first `<filename>…</filename>` pair.
///
/// The inner text is returned verbatim. The model may prepend explanatory
/// prose before the tags; everything outside the pair is ignored. A response
/// without a matching pair is a hard extraction failure, never recovered from.
pub fn extract_filename(text: &str) -> Result<String> {
    filename_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            Error::Extraction("no <filename> tag found in model response".to_string())
        })
}
