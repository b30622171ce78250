//! HTML-like labels for nodes and edges.
//!
//! Text is wrapped first and escaped afterwards, one line at a time, so the
//! `<BR/>` separators inserted by wrapping survive as markup.

use blueprint_core::text::{LINE_BREAK, wrap_words};

use crate::view::ViewRef;

/// Escape the characters that are significant in HTML-like labels.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap `text` to `limit` and escape every resulting line.
fn wrap_escaped(text: &str, limit: usize) -> String {
    wrap_words(text, limit)
        .split(LINE_BREAK)
        .map(escape_html)
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Label of an entity node.
///
/// ```text
/// <FONT POINT-SIZE="14"><B>Name</B></FONT><BR/>[Kind: Technology]<BR/><BR/>Description
/// ```
///
/// The name is never wrapped. The kind line and the description are wrapped
/// to `limit`; the technology part is omitted when empty.
pub fn node_label(
    name: &str,
    kind: &str,
    technology: &str,
    description: &str,
    limit: usize,
) -> String {
    let kind_line = if technology.is_empty() {
        format!("[{kind}]")
    } else {
        format!("[{}]", wrap_escaped(&format!("{kind}: {technology}"), limit))
    };
    format!(
        "<FONT POINT-SIZE=\"14\"><B>{}</B></FONT>{LINE_BREAK}{kind_line}{LINE_BREAK}{LINE_BREAK}{}",
        escape_html(name),
        wrap_escaped(description, limit),
    )
}

/// Label of a relationship edge: the description, and the technology in
/// brackets when present, inside a borderless table.
pub fn edge_label(description: &str, technology: &str, limit: usize) -> String {
    let mut text = wrap_escaped(description, limit);
    if !technology.is_empty() {
        text.push_str(LINE_BREAK);
        text.push('[');
        text.push_str(&wrap_escaped(technology, limit));
        text.push(']');
    }
    format!("<TABLE BORDER=\"0\"><TR><TD>{text}</TD></TR></TABLE>")
}

/// Relative link from one published view to another.
pub fn drill_down_link(target: &ViewRef) -> String {
    let file = match target.name() {
        Some(name) => format!("{}.html", urlencoding::encode(name)),
        None => "index.html".to_string(),
    };
    format!("../{}/{file}", target.kind().segment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_label_with_technology() {
        assert_eq!(
            node_label("Web App", "Container", "Rust", "Serves pages", 38),
            "<FONT POINT-SIZE=\"14\"><B>Web App</B></FONT><BR/>[Container: Rust]<BR/><BR/>Serves pages"
        );
    }

    #[test]
    fn test_node_label_without_technology() {
        assert_eq!(
            node_label("Shop", "System", "", "", 38),
            "<FONT POINT-SIZE=\"14\"><B>Shop</B></FONT><BR/>[System]<BR/><BR/>"
        );
    }

    #[test]
    fn test_node_label_wraps_then_escapes() {
        let label = node_label("A<B", "Persona", "", "one two three", 7);
        assert!(label.contains("<B>A&lt;B</B>"));
        assert!(label.ends_with("one two<BR/>three"));
    }

    #[test]
    fn test_node_label_wraps_kind_line() {
        let label = node_label(
            "API",
            "Container",
            "Java and Spring MVC with lots of other frameworks",
            "",
            38,
        );
        assert!(label.contains("[Container: Java and Spring MVC with<BR/>lots of other frameworks]"));
    }

    #[test]
    fn test_node_label_keeps_name_on_one_line() {
        let name = "A very long system name that exceeds the thirty eight limit";
        let label = node_label(name, "System", "", "", 38);
        assert!(label.starts_with(&format!("<FONT POINT-SIZE=\"14\"><B>{name}</B></FONT>")));
    }

    #[test]
    fn test_edge_label_wraps_technology() {
        assert_eq!(
            edge_label("Calls", "JSON over HTTPS with mutual TLS and retries", 38),
            "<TABLE BORDER=\"0\"><TR><TD>Calls<BR/>[JSON over HTTPS with mutual TLS and<BR/>retries]</TD></TR></TABLE>"
        );
    }

    #[test]
    fn test_edge_label() {
        assert_eq!(
            edge_label("Reads & writes", "", 38),
            "<TABLE BORDER=\"0\"><TR><TD>Reads &amp; writes</TD></TR></TABLE>"
        );
        assert_eq!(
            edge_label("Uses", "JSON/HTTPS", 38),
            "<TABLE BORDER=\"0\"><TR><TD>Uses<BR/>[JSON/HTTPS]</TD></TR></TABLE>"
        );
    }

    #[test]
    fn test_drill_down_link_is_url_encoded() {
        assert_eq!(
            drill_down_link(&ViewRef::container("Internet Banking")),
            "../containers/Internet%20Banking.html"
        );
        assert_eq!(
            drill_down_link(&ViewRef::component("API")),
            "../components/API.html"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
