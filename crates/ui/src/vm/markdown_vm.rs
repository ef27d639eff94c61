use std::collections::{HashMap, HashSet};

/// Render module markdown to sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "hr", "em", "strong", "b", "i", "del", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "img", "h1", "h2", "h3", "h4", "h5", "h6", "table",
        "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("img", ["src", "alt", "title"].into_iter().collect());
    for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        attributes.insert(heading, ["id"].into_iter().collect());
    }

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_keep_anchor_ids() {
        let html = markdown_to_html("## Tools {#tools}\n\nSee [tools](#tools).");
        assert!(html.contains(r#"<h2 id="tools">"#), "{html}");
        assert!(html.contains(r##"href="#tools""##), "{html}");
    }

    #[test]
    fn scripts_are_stripped() {
        let html = markdown_to_html("hello <script>alert(1)</script>");
        assert!(!html.contains("script"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn images_survive_sanitizing() {
        let html = markdown_to_html("![lamp](https://example.com/lamp.png)");
        assert!(html.contains(r#"src="https://example.com/lamp.png""#), "{html}");
    }
}
