//! Targeted cleanup of HTML artifacts in chunk content.
//!
//! Only page-level wrappers and inline styles are removed; every other tag is
//! kept verbatim because tables and lists in chunks carry meaning for the model.

use std::sync::LazyLock;

use regex::Regex;

static ARTIFACTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)( style="[^"]+"|</?(html|body|head|title)>|<!DOCTYPE html>)"#).unwrap()
});

/// Replace inline `style="..."` attributes, `<html>`/`<body>`/`<head>`/`<title>`
/// tags (opening and closing) and `<!DOCTYPE html>` with a single space.
///
/// Matching is case-insensitive and spans line breaks.
#[must_use]
pub fn sanitize(text: &str) -> String {
    ARTIFACTS.replace_all(text, " ").into_owned()
}
