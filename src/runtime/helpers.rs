//! Shared helpers for embedding data in the generated page.

use serde::Serialize;

/// Serialize `value` as a JSON literal that is safe inside an inline
/// `<script>` element: `</` cannot close the element and the two Unicode
/// line separators cannot break a JS string.
pub(super) fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    json.replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

pub(super) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
