//! Caller-supplied post metadata and the analysis input record.
//!
//! The editor normally supplies the SEO title, description and slug
//! directly. When only a full HTML page is at hand, [`Metadata::from_document`]
//! recovers them from the page head.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Document;

/// SEO metadata of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    /// The URL path segment identifying the post.
    pub slug: String,
}

impl Metadata {
    pub fn new(title: impl Into<String>, description: impl Into<String>, slug: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), slug: slug.into() }
    }

    /// Recovers metadata from a full HTML page.
    ///
    /// Title priority: JSON-LD `headline`, `og:title`, `twitter:title`, meta
    /// `title`, then the `<title>` element. Description priority: JSON-LD
    /// `description`, `og:description`, meta `description`. The slug is the
    /// last path segment of the canonical URL (or `og:url`). Missing fields
    /// are left empty so the corresponding checks report them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use proscore_core::{Document, Metadata};
    ///
    /// let html = r#"<html><head>
    ///     <title>Fallback</title>
    ///     <meta property="og:title" content="Writing Clear Posts">
    ///     <meta name="description" content="How to write clearly.">
    ///     <link rel="canonical" href="https://blog.example.com/posts/writing-clear-posts/">
    /// </head><body></body></html>"#;
    ///
    /// let meta = Metadata::from_document(&Document::parse(html));
    /// assert_eq!(meta.title, "Writing Clear Posts");
    /// assert_eq!(meta.description, "How to write clearly.");
    /// assert_eq!(meta.slug, "writing-clear-posts");
    /// ```
    pub fn from_document(doc: &Document) -> Self {
        let json_ld = json_ld(doc);
        let from_json_ld = |key: &str| {
            json_ld
                .as_ref()
                .and_then(|value| value.get(key))
                .and_then(|value| value.as_str())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let title = from_json_ld("headline")
            .or_else(|| meta_content(doc, "og:title"))
            .or_else(|| meta_content(doc, "twitter:title"))
            .or_else(|| meta_content(doc, "title"))
            .or_else(|| title_element(doc))
            .unwrap_or_default();

        let description = from_json_ld("description")
            .or_else(|| meta_content(doc, "og:description"))
            .or_else(|| meta_content(doc, "description"))
            .unwrap_or_default();

        let slug = canonical_url(doc).and_then(|url| slug_from_url(&url)).unwrap_or_default();

        Self { title, description, slug }
    }
}

/// Everything [`crate::Analyzer::analyze`] needs for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub html: String,
    pub metadata: Metadata,
    /// Language code as supplied by the caller, e.g. `tr` or `en-US`.
    pub language: String,
}

impl AnalysisInput {
    pub fn new(html: impl Into<String>, metadata: Metadata, language: impl Into<String>) -> Self {
        Self { html: html.into(), metadata, language: language.into() }
    }
}

/// Content of the first `<meta>` whose `name` or `property` is `key`.
fn meta_content(doc: &Document, key: &str) -> Option<String> {
    ["name", "property"].into_iter().find_map(|attr| {
        doc.select(&format!("meta[{}=\"{}\"]", attr, key))
            .into_iter()
            .find_map(|el| el.attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
    })
}

fn title_element(doc: &Document) -> Option<String> {
    doc.select("head title")
        .first()
        .map(|el| el.text().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|title| !title.is_empty())
}

/// The first JSON-LD block that parses.
fn json_ld(doc: &Document) -> Option<serde_json::Value> {
    doc.select("script[type=\"application/ld+json\"]")
        .iter()
        .find_map(|el| serde_json::from_str::<serde_json::Value>(el.text().trim()).ok())
}

fn canonical_url(doc: &Document) -> Option<String> {
    doc.select("link[rel=\"canonical\"]")
        .into_iter()
        .find_map(|el| el.attr("href"))
        .map(str::to_string)
        .or_else(|| meta_content(doc, "og:url"))
}

/// Last non-empty path segment of an absolute URL.
fn slug_from_url(href: &str) -> Option<String> {
    let url = Url::parse(href.trim()).ok()?;
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML_WITH_JSON_LD: &str = r#"
        <!DOCTYPE html>
        <html lang="tr">
        <head>
            <title>Site | Yazı</title>
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "BlogPosting",
                "headline": "Okunabilir İçerik Yazmak",
                "description": "Kısa cümleler ve net başlıklarla okunabilir içerik yazmanın yolları."
            }
            </script>
            <meta property="og:title" content="OG Title">
            <meta property="og:url" content="https://blog.example.com/yazilar/okunabilir-icerik">
        </head>
        <body><h1>Okunabilir İçerik</h1></body>
        </html>
    "#;

    const HTML_WITHOUT_META: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>  Simple
                Page </title>
        </head>
        <body><p>Text</p></body>
        </html>
    "#;

    #[test]
    fn test_from_document_prefers_json_ld() {
        let meta = Metadata::from_document(&Document::parse(HTML_WITH_JSON_LD));
        assert_eq!(meta.title, "Okunabilir İçerik Yazmak");
        assert!(meta.description.starts_with("Kısa cümleler"));
        assert_eq!(meta.slug, "okunabilir-icerik");
    }

    #[test]
    fn test_from_document_title_fallback() {
        let meta = Metadata::from_document(&Document::parse(HTML_WITHOUT_META));
        assert_eq!(meta.title, "Simple Page");
        assert_eq!(meta.description, "");
        assert_eq!(meta.slug, "");
    }

    #[test]
    fn test_from_fragment_is_empty() {
        let meta = Metadata::from_document(&Document::parse("<p>Only body content</p>"));
        assert_eq!(meta, Metadata::default());
    }

    #[test]
    fn test_invalid_json_ld_is_skipped() {
        let html = r#"<head>
            <script type="application/ld+json">{ not json</script>
            <meta name="description" content="Plain description">
        </head>"#;
        let meta = Metadata::from_document(&Document::parse(html));
        assert_eq!(meta.description, "Plain description");
    }

    #[test]
    fn test_slug_from_url() {
        assert_eq!(slug_from_url("https://example.com/blog/my-post/"), Some("my-post".to_string()));
        assert_eq!(slug_from_url("https://example.com/"), None);
        assert_eq!(slug_from_url("/relative/path"), None);
    }

    #[test]
    fn test_metadata_json_defaults() {
        let meta: Metadata = serde_json::from_str(r#"{ "title": "Only a title" }"#).unwrap();
        assert_eq!(meta.title, "Only a title");
        assert_eq!(meta.slug, "");
    }
}
