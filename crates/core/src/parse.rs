//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! extractor. Parsing is backed by html5ever through `scraper`, which never
//! rejects input: malformed markup is repaired into a best-effort tree.
//!
//! # Example
//!
//! ```rust
//! use proscore_core::parse::{Child, Document};
//!
//! let doc = Document::parse("<h1>Title</h1><p>Paragraph</p>");
//! let body = doc.body();
//! let tags: Vec<&str> = body
//!     .children()
//!     .into_iter()
//!     .filter_map(|child| match child {
//!         Child::Element(el) => Some(el.tag_name()),
//!         Child::Text(_) => None,
//!     })
//!     .collect();
//! assert_eq!(tags, vec!["h1", "p"]);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::preprocess::{PreprocessConfig, preprocess_html};

/// Represents a parsed HTML document.
///
/// Accepts either a full page or a body fragment as produced by a rich-text
/// editor; fragments are placed inside an implied `<body>`.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string without preprocessing.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses HTML after removing markup that never renders as text.
    ///
    /// See [`preprocess_html`] for what is removed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use proscore_core::{Document, PreprocessConfig};
    ///
    /// let html = "<script>track()</script><p>Hello</p>";
    /// let doc = Document::parse_with_preprocessing(html, &PreprocessConfig::default());
    /// assert_eq!(doc.body().text(), "Hello");
    /// ```
    pub fn parse_with_preprocessing(html: &str, config: &PreprocessConfig) -> Self {
        let cleaned = preprocess_html(html, config);
        Self::parse(&cleaned)
    }

    /// Gets the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects elements matching a CSS selector, in document order.
    ///
    /// An unparseable selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<Element<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).map(|element| Element { element }).collect(),
            Err(e) => {
                tracing::debug!(selector, error = %e, "ignoring invalid selector");
                Vec::new()
            }
        }
    }

    /// Gets the `<body>` element, or the root element if the tree has none.
    pub fn body(&self) -> Element<'_> {
        let body = Selector::parse("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next());

        Element { element: body.unwrap_or_else(|| self.html.root_element()) }
    }
}

/// A child node of an [`Element`]: either a nested element or a text node.
///
/// Comments, doctypes and processing instructions are not exposed.
#[derive(Clone, Copy, Debug)]
pub enum Child<'a> {
    Element(Element<'a>),
    Text(&'a str),
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use proscore_core::parse::{Child, Document};
///
/// let doc = Document::parse(r#"<a href="/about">About us</a>"#);
/// let link = doc
///     .body()
///     .children()
///     .into_iter()
///     .find_map(|child| match child {
///         Child::Element(el) => Some(el),
///         Child::Text(_) => None,
///     })
///     .unwrap();
///
/// assert_eq!(link.tag_name(), "a");
/// assert_eq!(link.attr("href"), Some("/about"));
/// assert_eq!(link.text(), "About us");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, `None` if the attribute is absent.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the tag name of this element.
    ///
    /// html5ever lowercases HTML tag names while parsing.
    pub fn tag_name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Gets the element and text children in document order.
    pub fn children(&self) -> Vec<Child<'a>> {
        self.element
            .children()
            .filter_map(|node| {
                if let Some(element) = ElementRef::wrap(node) {
                    Some(Child::Element(Element { element }))
                } else {
                    node.value().as_text().map(|text| Child::Text(&**text))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_elements<'a>(el: &Element<'a>) -> Vec<Element<'a>> {
        el.children()
            .into_iter()
            .filter_map(|child| match child {
                Child::Element(el) => Some(el),
                Child::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_fragment_into_body() {
        let doc = Document::parse("<h1>Heading</h1><p>Paragraph 1</p><p>Paragraph 2</p>");
        let body = doc.body();
        assert_eq!(body.tag_name(), "body");

        let children = child_elements(&body);
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].tag_name(), "h1");
        assert_eq!(children[2].text(), "Paragraph 2");
    }

    #[test]
    fn test_parse_full_document_ignores_head() {
        let html = r#"
            <!DOCTYPE html>
            <html lang="en">
            <head><title>Page Title</title></head>
            <body><p>Body text</p></body>
            </html>
        "#;

        let doc = Document::parse(html);
        let text = doc.body().text();
        assert!(text.contains("Body text"));
        assert!(!text.contains("Page Title"));
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(r#"<img src="a.png" alt="A diagram"><img src="b.png">"#);
        let images = child_elements(&doc.body());

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].attr("alt"), Some("A diagram"));
        assert_eq!(images[1].attr("alt"), None);
    }

    #[test]
    fn test_uppercase_tags_are_lowercased() {
        let doc = Document::parse("<H2>Section</H2>");
        let children = child_elements(&doc.body());
        assert_eq!(children[0].tag_name(), "h2");
    }

    #[test]
    fn test_children_include_text_in_order() {
        let doc = Document::parse("<p>Hello <b>bold</b> world</p>");
        let p = child_elements(&doc.body())[0];
        let kinds: Vec<String> = p
            .children()
            .into_iter()
            .map(|child| match child {
                Child::Element(el) => format!("<{}>", el.tag_name()),
                Child::Text(t) => t.to_string(),
            })
            .collect();

        assert_eq!(kinds, vec!["Hello ", "<b>", " world"]);
    }

    #[test]
    fn test_entities_are_resolved() {
        let doc = Document::parse("<p>Fish &amp; chips &mdash; &quot;fresh&quot;</p>");
        assert_eq!(doc.body().text(), "Fish & chips \u{2014} \"fresh\"");
    }

    #[test]
    fn test_malformed_html_does_not_fail() {
        let doc = Document::parse("<p>Unclosed <b>bold <i>text</p></div></span><<>>");
        assert!(doc.body().text().contains("Unclosed"));
    }

    #[test]
    fn test_select() {
        let doc = Document::parse(r#"<head><meta name="description" content="About"></head><p>a</p><p>b</p>"#);
        assert_eq!(doc.select("p").len(), 2);
        assert_eq!(doc.select("meta[name=\"description\"]")[0].attr("content"), Some("About"));
        assert!(doc.select("p[[").is_empty());
    }

    #[test]
    fn test_parse_with_preprocessing() {
        let html = "<style>p { color: red }</style><p>Visible</p><!-- hidden note -->";
        let doc = Document::parse_with_preprocessing(html, &PreprocessConfig::default());
        assert_eq!(doc.body().text(), "Visible");
    }
}
