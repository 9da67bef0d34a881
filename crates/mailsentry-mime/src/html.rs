//! HTML body handling: script/style removal, visible-text extraction, and
//! `href`/`src`/`action` attribute collection for URL discovery.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</\1>").expect("static regex")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static ATTR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[href], [src], [action]").expect("static selector"));

/// Drops `<script>`/`<style>` subtrees and returns the remaining markup.
fn strip_script_style(html: &str) -> String {
    SCRIPT_STYLE.replace_all(html, "").into_owned()
}

/// Extracts the visible text of an HTML fragment: script/style removed,
/// remaining tags stripped, whitespace collapsed.
pub fn visible_text(html: &str) -> String {
    let stripped = strip_script_style(html);
    let no_tags = TAG.replace_all(&stripped, " ");
    WHITESPACE.replace_all(no_tags.trim(), " ").into_owned()
}

/// Collects every `href`, `src`, and `action` attribute value in the
/// document, script/style subtrees excluded.
pub fn extract_attribute_urls(html: &str) -> Vec<String> {
    let stripped = strip_script_style(html);
    let document = Html::parse_document(&stripped);
    document
        .select(&ATTR_SELECTOR)
        .filter_map(|el| {
            let value = el
                .value()
                .attr("href")
                .or_else(|| el.value().attr("src"))
                .or_else(|| el.value().attr("action"))?;
            Some(value.trim().to_string())
        })
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_script_and_style_from_visible_text() {
        let html = "<html><head><style>.x{}</style></head><body>hi<script>evil()</script> there</body></html>";
        assert_eq!(visible_text(html), "hi there");
    }

    #[test]
    fn collects_href_src_action() {
        let html = r#"<a href="http://a.test">x</a><img src="http://b.test/i.png"><form action="http://c.test/submit"></form>"#;
        let urls = extract_attribute_urls(html);
        assert_eq!(
            urls,
            vec!["http://a.test", "http://b.test/i.png", "http://c.test/submit"]
        );
    }

    #[test]
    fn script_tag_hrefs_are_excluded() {
        let html = r#"<script>var href="http://evil.test";</script><a href="http://ok.test">x</a>"#;
        assert_eq!(extract_attribute_urls(html), vec!["http://ok.test"]);
    }
}
