//! Flattening of export-page HTML into matchable text.
//!
//! The page's tag structure is not a stable contract, so nothing here
//! tries to understand it: elements with no text value are stripped, every
//! other tag becomes a space so adjacent blocks do not fuse into one
//! token, and the handful of entities the export host emits are decoded
//! (`&#39;` matters for apostrophe names).

/// Flatten an HTML document to whitespace-normalized text.
#[must_use]
pub fn html_to_text(bytes: &[u8]) -> String {
    let html = String::from_utf8_lossy(bytes);

    let html = strip_element(&html, "script");
    let html = strip_element(&html, "style");

    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if in_tag => {}
            _ => text.push(c),
        }
    }

    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&quot;", "\"");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove `<tag ...>...</tag>` elements, content included.
fn strip_element(html: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(&open) {
        out.push_str(&rest[..start]);
        out.push(' ');
        let after = &rest[start..];
        match after.find(&close) {
            Some(end) => rest = &after[end + close.len()..],
            None => {
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_and_styles() {
        let html = r"<html><head><style>.a{color:red}</style></head><body><h1>Title</h1><script>var x = 1;</script><pre>Pikachu @ Light Ball</pre></body></html>";
        let text = html_to_text(html.as_bytes());
        assert!(!text.contains("var x"));
        assert!(!text.contains("color"));
        assert!(text.contains("Pikachu @ Light Ball"));
    }

    #[test]
    fn tags_become_separators() {
        let html = "<article><pre>Charizard</pre></article><article><pre>Pikachu</pre></article>";
        let text = html_to_text(html.as_bytes());
        assert_eq!(text, "Charizard Pikachu");
    }

    #[test]
    fn decodes_apostrophe_entities() {
        let html = "<pre>Farfetch&#39;d @ Leek</pre>";
        let text = html_to_text(html.as_bytes());
        assert!(text.contains("Farfetch'd"));
    }

    #[test]
    fn attributed_open_tags_are_stripped() {
        let html = r#"<script type="text/javascript">bad()</script>ok"#;
        assert_eq!(html_to_text(html.as_bytes()), "ok");
    }

    #[test]
    fn unterminated_element_drops_trailing_content() {
        let html = "before<script>never closed";
        assert_eq!(html_to_text(html.as_bytes()), "before");
    }
}
