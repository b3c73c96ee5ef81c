use std::sync::OnceLock;
use regex::Regex;

/// Renders an event description (Google allows limited HTML) as wrapped plain lines.
pub fn description_lines(description: &str, width: usize) -> Vec<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let text = if looks_like_html(trimmed) {
        html2text::from_read(expand_anchor_tags(trimmed).as_bytes(), width.max(20))
    } else {
        trimmed.to_string()
    };

    let mut lines: Vec<String> = text.lines().map(|line| line.trim_end().to_string()).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn looks_like_html(text: &str) -> bool {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE
        .get_or_init(|| Regex::new(r"(?i)</?[a-z][a-z0-9]*[^>]*>|&[a-z]+;").expect("invalid tag regex"))
        .is_match(text)
}

fn expand_anchor_tags(html: &str) -> String {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    let regex = LINK_RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s+[^>]*?href=["']([^"']+)["'][^>]*>(.*?)</a>"#)
            .expect("invalid anchor regex")
    });

    regex
        .replace_all(html, |caps: &regex::Captures| {
            let url = caps.get(1).map(|m| m.as_str()).unwrap_or_default().trim();
            let text = caps.get(2).map(|m| m.as_str()).unwrap_or_default().trim();

            if text.is_empty() || url.eq_ignore_ascii_case(text) {
                url.to_string()
            } else {
                format!("{text} ({url})")
            }
        })
        .into_owned()
}
