//! Pages served by the dev loop: the packed artifact with a reload hook, and
//! an error page for a failed first build.

/// Polls `/version` and reloads the page when the build number moves.
const RELOAD_JS: &str = r#"<script>
(function () {
  var seen = null;
  setInterval(function () {
    fetch('/version').then(function (r) { return r.text(); }).then(function (v) {
      if (seen === null) seen = v;
      else if (v !== seen) location.reload();
    }).catch(function () {});
  }, 1000);
})();
</script>
"#;

/// Insert the reload hook right before the closing body tag.
pub(super) fn with_reload_hook(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + RELOAD_JS.len());
            out.push_str(&html[..at]);
            out.push_str(RELOAD_JS);
            out.push_str(&html[at..]);
            out
        }
        None => format!("{html}{RELOAD_JS}"),
    }
}

pub(super) fn build_error_page(root: &str, error: &str) -> String {
    let root = html_escape(root);
    let escaped = html_escape(error);
    let page = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>brawl-pack dev: error</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  html, body {{ width: 100%; height: 100%; background: #0A0A0A; color: #A0A0A0;
    font-family: monospace; }}
  .error-container {{
    max-width: 640px; margin: 80px auto; padding: 32px;
    border: 1px solid #3F1818; border-radius: 8px;
  }}
  .error-header {{ margin-bottom: 20px; font-size: 13px; color: #EF4444; }}
  .error-message {{
    font-size: 12px; color: #EF4444; line-height: 1.7;
    white-space: pre-wrap; word-break: break-word;
    padding: 16px; background: #141414; border-left: 3px solid #EF4444;
  }}
  .hint {{ margin-top: 24px; font-size: 11px; color: #666; }}
</style>
</head>
<body>
<div class="error-container">
  <div class="error-header">packing {root} failed</div>
  <div class="error-message">{escaped}</div>
  <div class="hint">fix the asset folder; this page reloads on the next good build</div>
</div>
</body>
</html>
"##
    );
    with_reload_hook(&page)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_lands_before_last_body_close() {
        let out = with_reload_hook("<html><body>x</body></html>");
        assert!(out.ends_with("</script>\n</body></html>"));
        assert!(out.contains("fetch('/version')"));
    }

    #[test]
    fn hook_appended_without_body() {
        let out = with_reload_hook("plain");
        assert!(out.starts_with("plain<script>"));
    }

    #[test]
    fn error_page_escapes_message() {
        let page = build_error_page("assets", "cannot access '<x>'");
        assert!(page.contains("cannot access '&lt;x&gt;'"));
        assert!(page.contains("packing assets failed"));
    }
}
