//! Denylist HTML sanitizer for rich-text fields.
//!
//! Three passes, repeated until the text stops changing:
//!
//! 1. `<script ...>...</script>` blocks (case-insensitive, shortest match)
//! 2. `javascript:` scheme fragments
//! 3. inline event-handler assignments (`onclick=`, `onload =`, ...)
//!
//! This guards against unsafe markup from a trusted but imperfect content
//! source. It is not a parser and does not stop a determined attacker
//! (attribute-context breakouts, `data:` URIs and the like pass through).

use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_script_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?is)<script\b.*?</script\s*>"))
}

fn regex_javascript_scheme() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?i)javascript\s*:"))
}

fn regex_event_handler() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?i)on\w+\s*="))
}

/// Strips script blocks, `javascript:` fragments and inline event handlers.
///
/// Idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
///
/// ```rust
/// use section_widgets::sanitize;
///
/// assert_eq!(sanitize("<script>alert(1)</script>hello"), "hello");
/// assert!(!sanitize(r#"<div onclick="x()">y</div>"#).contains("onclick="));
/// ```
pub fn sanitize(html: &str) -> String {
    // Removing one fragment can join two halves into a new one
    // (`javajavascript:script:`), so passes repeat until nothing changes.
    // A pass that changes the text makes it shorter, so this terminates.
    let mut current = html.to_string();
    loop {
        let next = single_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn single_pass(html: &str) -> String {
    let out = regex_script_block().replace_all(html, "");
    let out = regex_javascript_scheme().replace_all(&out, "");
    let out = regex_event_handler().replace_all(&out, "");
    out.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "<script>alert(1)</script>hello",
        r#"<a href="javascript:evil()">x</a>"#,
        r#"<div onclick="x()">y</div>"#,
        "<SCRIPT type=\"text/javascript\">a()</SCRIPT>b<script>c()</script>d",
        "javajavascript:script:alert(1)",
        "<scr<script></script>ipt>alert(1)</script>",
        r#"<img src=x oonerror=nerror=alert(1)>"#,
        "Courtier en <span class=\"highlight\">électricité</span><br />",
        "",
    ];

    #[test]
    fn removes_script_blocks() {
        assert_eq!(sanitize("<script>alert(1)</script>hello"), "hello");
    }

    #[test]
    fn removes_multiple_script_blocks_non_greedy() {
        let out = sanitize("a<script>x()</script>b<ScRiPt src='y'>\n</sCrIpT >c");
        assert_eq!(out, "abc");
    }

    #[test]
    fn removes_javascript_scheme() {
        let out = sanitize(r#"<a href="javascript:evil()">x</a>"#);
        assert!(!out.to_lowercase().contains("javascript:"));
        assert!(out.contains(">x</a>"));
    }

    #[test]
    fn removes_event_handlers() {
        let out = sanitize(r#"<div onclick="x()">y</div>"#);
        assert!(!out.contains("onclick="));
        assert!(out.contains(">y</div>"));

        let out = sanitize(r#"<img src="a.png" OnLoad = "boom()">"#);
        assert!(!out.to_lowercase().contains("onload"));
    }

    #[test]
    fn keeps_safe_markup_untouched() {
        let title = "Courtier en <span class=\"highlight\">électricité</span><br />et gaz";
        assert_eq!(sanitize(title), title);
        // "on" must be followed by at least one identifier character.
        assert_eq!(sanitize("data-button=1"), "data-button=1");
    }

    #[test]
    fn is_idempotent() {
        for sample in SAMPLES {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "input: {sample}");
        }
    }

    #[test]
    fn rejoined_fragments_are_removed() {
        let out = sanitize("javajavascript:script:alert(1)");
        assert!(!out.to_lowercase().contains("javascript:"));

        let out = sanitize(r#"<img src=x oonerror=nerror=alert(1)>"#);
        assert!(!out.contains("onerror="));
    }
}
