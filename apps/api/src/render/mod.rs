//! Markdown → safe HTML for model output.
//!
//! The model answers in light Markdown (bold, lists, headers). Raw HTML in that
//! text is escaped rather than passed through, and script-capable link schemes
//! are dropped, so callers can insert the result into the page as-is.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Renders Markdown into sanitised HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).map(sanitize_event);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        // Emitted as text, which push_html escapes.
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if BLOCKED_SCHEMES.iter().any(|s| normalized.starts_with(s)) {
        CowStr::Borrowed("")
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_bold_and_lists() {
        let html = markdown_to_html("**Match Score: 85%**\n\n- Python\n- SQL\n- Pandas\n");
        assert!(html.contains("<strong>Match Score: 85%</strong>"));
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_renders_headers() {
        let html = markdown_to_html("## Summary\nGreat fit.");
        assert!(html.contains("<h2>Summary</h2>"));
    }

    #[test]
    fn test_escapes_inline_html() {
        let html = markdown_to_html("hello <script>alert(1)</script> world");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_escapes_html_blocks() {
        let html = markdown_to_html("<div onclick=\"x()\">hi</div>\n");
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;div"));
    }

    #[test]
    fn test_drops_javascript_links() {
        let html = markdown_to_html("[click](javascript:alert(1))");
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(html.contains(">click</a>"));
    }

    #[test]
    fn test_drops_obfuscated_scheme() {
        assert_eq!(safe_url(CowStr::Borrowed(" JavaScript:alert(1)")).as_ref(), "");
        assert_eq!(safe_url(CowStr::Borrowed("DATA:text/html,x")).as_ref(), "");
    }

    #[test]
    fn test_keeps_mailto_and_https_links() {
        let html = markdown_to_html("[mail](mailto:a@example.com) [web](https://example.com)");
        assert!(html.contains("href=\"mailto:a@example.com\""));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_plain_text_is_paragraph() {
        assert_eq!(markdown_to_html("Python, C, C++..."), "<p>Python, C, C++...</p>\n");
    }
}
