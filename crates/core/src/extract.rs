//! Plain text and structure extraction.
//!
//! A single walk over the parsed document produces both the visible text
//! (for linguistic statistics) and the structural tallies the SEO checks
//! need: headings by level, paragraphs, images by alt status, and links by
//! destination.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::parse::{Child, Document, Element};

/// Elements whose boundaries separate words in the rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Where a link points relative to the site being analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
}

/// Classifies anchor hrefs as internal or external.
///
/// An href is internal when it is root-relative (starts with `/`) or
/// contains the site's base URL. Otherwise it is external when it starts
/// with an `http` or `https` scheme. Anything else (fragments, `mailto:`,
/// page-relative paths) is not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkClassifier {
    base_url: Option<String>,
}

impl LinkClassifier {
    /// Creates a classifier. A trailing slash on the base URL is ignored and
    /// a blank base URL disables the base URL rule.
    pub fn new(site_base_url: Option<&str>) -> Self {
        let base_url = site_base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Self { base_url }
    }

    pub fn classify(&self, href: &str) -> Option<LinkKind> {
        let href = href.trim();

        if href.starts_with('/') {
            return Some(LinkKind::Internal);
        }

        if let Some(base) = &self.base_url
            && href.contains(base.as_str())
        {
            return Some(LinkKind::Internal);
        }

        let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Some(LinkKind::External);
        }

        None
    }
}

/// Element tallies gathered while walking the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralCounts {
    /// Heading count per level; all six levels are always present.
    pub heading_counts: BTreeMap<u8, usize>,
    pub paragraph_count: usize,
    pub images_with_alt: usize,
    /// Images with no `alt` or a whitespace-only `alt`.
    pub images_without_alt: usize,
    /// The whitespace-only subset of `images_without_alt`.
    pub images_with_empty_alt: usize,
    pub internal_links: usize,
    pub external_links: usize,
}

impl Default for StructuralCounts {
    fn default() -> Self {
        Self {
            heading_counts: (1..=6).map(|level| (level, 0)).collect(),
            paragraph_count: 0,
            images_with_alt: 0,
            images_without_alt: 0,
            images_with_empty_alt: 0,
            internal_links: 0,
            external_links: 0,
        }
    }
}

impl StructuralCounts {
    /// Number of headings at `level` (1 through 6).
    pub fn headings(&self, level: u8) -> usize {
        self.heading_counts.get(&level).copied().unwrap_or(0)
    }

    pub fn total_images(&self) -> usize {
        self.images_with_alt + self.images_without_alt
    }

    fn record(&mut self, element: &Element<'_>, links: &LinkClassifier) {
        match element.tag_name() {
            "h1" => self.bump_heading(1),
            "h2" => self.bump_heading(2),
            "h3" => self.bump_heading(3),
            "h4" => self.bump_heading(4),
            "h5" => self.bump_heading(5),
            "h6" => self.bump_heading(6),
            "p" => self.paragraph_count += 1,
            "img" => match element.attr("alt") {
                Some(alt) if !alt.trim().is_empty() => self.images_with_alt += 1,
                Some(_) => {
                    self.images_without_alt += 1;
                    self.images_with_empty_alt += 1;
                }
                None => self.images_without_alt += 1,
            },
            "a" => match element.attr("href").and_then(|href| links.classify(href)) {
                Some(LinkKind::Internal) => self.internal_links += 1,
                Some(LinkKind::External) => self.external_links += 1,
                None => {}
            },
            _ => {}
        }
    }

    fn bump_heading(&mut self, level: u8) {
        *self.heading_counts.entry(level).or_insert(0) += 1;
    }
}

/// Output of [`extract_content`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Visible text with whitespace collapsed to single spaces.
    pub text: String,
    pub structure: StructuralCounts,
}

enum Step<'a> {
    Open(Element<'a>),
    Close { block: bool },
    Text(&'a str),
}

/// Walks the document body once, collecting text and structural counts.
///
/// Uses an explicit stack so deeply nested markup cannot exhaust the call
/// stack.
pub fn extract_content(doc: &Document, links: &LinkClassifier) -> ExtractedContent {
    let mut raw = String::new();
    let mut structure = StructuralCounts::default();
    let mut stack = vec![Step::Open(doc.body())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => raw.push_str(text),
            Step::Close { block } => {
                if block {
                    raw.push(' ');
                }
            }
            Step::Open(element) => {
                structure.record(&element, links);

                let block = is_block(element.tag_name());
                if block {
                    raw.push(' ');
                }
                stack.push(Step::Close { block });

                for child in element.children().into_iter().rev() {
                    stack.push(match child {
                        Child::Element(el) => Step::Open(el),
                        Child::Text(text) => Step::Text(text),
                    });
                }
            }
        }
    }

    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    ExtractedContent { text, structure }
}

/// Parses `html` without preprocessing and extracts its content.
pub fn extract(html: &str, links: &LinkClassifier) -> ExtractedContent {
    extract_content(&Document::parse(html), links)
}
