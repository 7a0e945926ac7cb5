//! HTML helper functions

use crate::cms::Paragraph;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render rich-text paragraphs to sanitized markup.
///
/// This is the explicit sanitize-then-render step between the CMS and the
/// page: every paragraph becomes a `<p>` whose text content is escaped.
/// Markup arriving inside the paragraph text stays inert.
pub fn render_rich_text(body: &[Paragraph]) -> String {
    body.iter()
        .map(|paragraph| format!("<p>{}</p>", html_escape(&paragraph.text)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
        texts
            .iter()
            .map(|text| Paragraph {
                text: text.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_render_rich_text_preserves_order() {
        let html = render_rich_text(&paragraphs(&["um", "dois"]));
        assert_eq!(html, "<p>um</p>\n<p>dois</p>");
    }

    #[test]
    fn test_render_rich_text_neutralizes_markup() {
        let html = render_rich_text(&paragraphs(&["<script>alert(1)</script>"]));
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_rich_text_empty_body() {
        assert_eq!(render_rich_text(&[]), "");
    }
}
