//! Content description types.

use serde::{Deserialize, Serialize};

/// Default character budget for text read from a page.
pub const PAGE_TEXT_CAP: usize = 15_000;

/// Default character budget for the body embedded in an analysis request.
pub const REQUEST_BODY_CAP: usize = 10_000;

/// What kind of content was scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Website,
    Email,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Website => "website",
            ContentKind::Email => "email",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized record of scraped page or email content.
///
/// Serialized with the field names the messaging boundary uses
/// (`type`, `source`, `title`, `content`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescription {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub source: String,
    pub title: String,
    #[serde(rename = "content", default)]
    pub body: String,
}

impl ContentDescription {
    /// Create a website description, truncating the body to `cap` characters.
    pub fn website(
        source: impl Into<String>,
        title: impl Into<String>,
        body: &str,
        cap: usize,
    ) -> Self {
        Self {
            kind: ContentKind::Website,
            source: source.into(),
            title: title.into(),
            body: truncate_chars(body, cap).to_string(),
        }
    }

    /// Create an email description, truncating the body to `cap` characters.
    pub fn email(
        source: impl Into<String>,
        title: impl Into<String>,
        body: &str,
        cap: usize,
    ) -> Self {
        Self {
            kind: ContentKind::Email,
            source: source.into(),
            title: title.into(),
            body: truncate_chars(body, cap).to_string(),
        }
    }

    /// Body cut down to the given budget.
    pub fn body_within(&self, cap: usize) -> &str {
        truncate_chars(&self.body, cap)
    }
}

/// Hard cut of `text` after `cap` characters.
///
/// Counts Unicode scalar values and always cuts on a char boundary.
pub fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_cap() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_exact_cap() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_cuts_mid_word() {
        assert_eq!(truncate_chars("hello world", 7), "hello w");
    }

    #[test]
    fn test_truncate_zero_cap() {
        assert_eq!(truncate_chars("hello", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "héllo wörld 🐔🐔🐔";
        for cap in 0..=text.chars().count() + 2 {
            let cut = truncate_chars(text, cap);
            assert!(cut.chars().count() <= cap);
            assert!(text.starts_with(cut));
        }
        assert_eq!(truncate_chars("🐔🐔🐔", 2), "🐔🐔");
    }

    #[test]
    fn test_website_body_capped() {
        let body = "x".repeat(PAGE_TEXT_CAP + 500);
        let desc = ContentDescription::website("http://example.com", "Example", &body, PAGE_TEXT_CAP);
        assert_eq!(desc.kind, ContentKind::Website);
        assert_eq!(desc.body.chars().count(), PAGE_TEXT_CAP);
    }

    #[test]
    fn test_email_body_capped() {
        let body = "é".repeat(20);
        let desc = ContentDescription::email("A <a@b.c>", "Hi", &body, 8);
        assert_eq!(desc.kind, ContentKind::Email);
        assert_eq!(desc.body.chars().count(), 8);
    }

    #[test]
    fn test_body_within_request_cap() {
        let body = "y".repeat(PAGE_TEXT_CAP);
        let desc = ContentDescription::website("u", "t", &body, PAGE_TEXT_CAP);
        assert_eq!(desc.body_within(REQUEST_BODY_CAP).len(), REQUEST_BODY_CAP);
    }

    #[test]
    fn test_wire_field_names() {
        let desc = ContentDescription::website("http://example.com", "Example", "Buy now", 100);
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["type"], "website");
        assert_eq!(json["content"], "Buy now");
        assert!(json.get("body").is_none());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_deserialize_without_content() {
        let json = r#"{"type": "email", "source": "s", "title": "t"}"#;
        let desc: ContentDescription = serde_json::from_str(json).unwrap();
        assert_eq!(desc.kind, ContentKind::Email);
        assert!(desc.body.is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ContentKind::Website.to_string(), "website");
        assert_eq!(ContentKind::Email.to_string(), "email");
    }
}
