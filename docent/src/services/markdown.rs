use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Link and image schemes kept as written. Relative URLs have no scheme.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render model output as HTML for the chat pane.
///
/// Raw HTML in the input is emitted as escaped text, never as markup, and
/// link or image URLs with any other scheme (`javascript:`, `data:`) are
/// replaced by `#`.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options).map(|event| match event {
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
    });

    let mut rendered = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_url(&url) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

/// Browsers skip whitespace and control characters inside a scheme, so
/// they are removed before the scheme is read.
fn is_allowed_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(index) if normalized[index..].starts_with(':') => {
            ALLOWED_SCHEMES.contains(&&normalized[..index])
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_and_lists() {
        let html = render_markdown("**Answer**\n\n- one\n- two");
        assert!(html.contains("<strong>Answer</strong>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("see <script>alert(1)</script> here");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let block = render_markdown("<div onclick=\"x()\">hi</div>");
        assert!(!block.contains("<div"));
    }

    #[test]
    fn test_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_script_urls_are_neutralized() {
        let html = render_markdown("[click me](javascript:alert(document.cookie))");
        assert_eq!(html, "<p><a href=\"#\">click me</a></p>\n");

        let mixed_case = render_markdown("[x](JavaScript:alert(1))");
        assert!(mixed_case.contains("href=\"#\""), "got: {mixed_case}");

        let image = render_markdown("![chart](data:text/html;base64,PHNjcmlwdD4=)");
        assert!(image.contains("src=\"#\""), "got: {image}");
    }

    #[test]
    fn test_safe_urls_are_kept() {
        let html = render_markdown("[docs](https://example.com/a?b=1) [mail](mailto:hr@example.com) [rel](/api/v1/docs)");
        assert!(html.contains("href=\"https://example.com/a?b=1\""));
        assert!(html.contains("href=\"mailto:hr@example.com\""));
        assert!(html.contains("href=\"/api/v1/docs\""));
    }

    #[test]
    fn test_is_allowed_url() {
        assert!(is_allowed_url("http://example.com"));
        assert!(is_allowed_url("report.pdf#page=2"));
        assert!(is_allowed_url("./a:b"));
        assert!(!is_allowed_url(" javascript:alert(1)"));
        assert!(!is_allowed_url("java\tscript:alert(1)"));
        assert!(!is_allowed_url("vbscript:msgbox"));
        assert!(!is_allowed_url("data:text/html,hi"));
    }
}
