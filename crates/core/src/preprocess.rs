use regex::Regex;
use std::sync::LazyLock;

static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").unwrap());

/// Configuration for HTML preprocessing
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Whether to remove script tags
    pub remove_scripts: bool,
    /// Whether to remove style tags
    pub remove_styles: bool,
    /// Whether to remove noscript tags
    pub remove_noscript: bool,
    /// Whether to remove template tags
    pub remove_templates: bool,
    /// Whether to remove iframe tags
    pub remove_iframes: bool,
    /// Whether to remove svg tags
    pub remove_svg: bool,
    /// Whether to remove canvas tags
    pub remove_canvas: bool,
    /// Whether to remove HTML comments
    pub remove_comments: bool,
    /// Whether to remove elements hidden with inline styles
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_scripts: true,
            remove_styles: true,
            remove_noscript: true,
            remove_templates: true,
            remove_iframes: true,
            remove_svg: true,
            remove_canvas: true,
            remove_comments: true,
            remove_hidden: true,
        }
    }
}

impl PreprocessConfig {
    /// Selectors for elements whose whole subtree is dropped.
    fn removed_selectors(&self) -> Vec<&'static str> {
        [
            (self.remove_scripts, "script"),
            (self.remove_styles, "style"),
            (self.remove_noscript, "noscript"),
            (self.remove_templates, "template"),
            (self.remove_iframes, "iframe"),
            (self.remove_svg, "svg"),
            (self.remove_canvas, "canvas"),
        ]
        .into_iter()
        .filter_map(|(enabled, selector)| enabled.then_some(selector))
        .collect()
    }

    fn is_noop(&self) -> bool {
        self.removed_selectors().is_empty() && !self.remove_comments && !self.remove_hidden
    }
}

/// Remove markup that never renders as visible text.
///
/// Runs a single streaming rewrite pass. If the rewriter rejects the input
/// the original HTML is returned unchanged, so callers always get something
/// parseable back.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    if html.is_empty() || config.is_noop() {
        return html.to_string();
    }

    let mut element_handlers = Vec::new();
    for selector in config.removed_selectors() {
        element_handlers.push(lol_html::element!(selector, |el| {
            el.remove();
            Ok(())
        }));
    }

    if config.remove_hidden {
        element_handlers.push(lol_html::element!("[style]", |el| {
            if let Some(style) = el.get_attribute("style")
                && HIDDEN_STYLE.is_match(&style)
            {
                el.remove();
            }
            Ok(())
        }));
    }

    let mut document_handlers = Vec::new();
    if config.remove_comments {
        document_handlers.push(lol_html::doc_comments!(|c| {
            c.remove();
            Ok(())
        }));
    }

    let mut output: Vec<u8> = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: element_handlers,
            document_content_handlers: document_handlers,
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::warn!(error = %e, "preprocessing failed, using raw html");
        return html.to_string();
    }

    if let Err(e) = rewriter.end() {
        tracing::warn!(error = %e, "preprocessing failed, using raw html");
        return html.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_unwanted_tags() {
        let html = r#"
            <script>alert('test');</script><style>p{color:red;}</style>
            <noscript>Enable JavaScript</noscript>
            <template><p>Template row</p></template>
            <iframe src="https://example.com"></iframe>
            <svg><text>Vector label</text></svg>
            <canvas id="chart"></canvas>
            <p>Content</p>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("alert"), "Script content should be removed");
        assert!(!result.contains("color:red"), "Style content should be removed");
        assert!(!result.contains("Enable JavaScript"));
        assert!(!result.contains("Template row"));
        assert!(!result.contains("example.com"));
        assert!(!result.contains("Vector label"));
        assert!(!result.contains("chart"));
        assert!(result.contains("<p>Content</p>"));
    }

    #[test]
    fn test_remove_comments() {
        let html = "<!-- draft note --><p>Visible content</p><!-- another -->";
        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("<!--"));
        assert!(!result.contains("draft note"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_remove_hidden_elements() {
        let html = r#"
            <div style="display:none">Hidden content</div>
            <div style="visibility: hidden">Invisible content</div>
            <div style="color: blue">Visible content</div>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("Hidden content"));
        assert!(!result.contains("Invisible content"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_disabled_config_is_passthrough() {
        let config = PreprocessConfig {
            remove_scripts: false,
            remove_styles: false,
            remove_noscript: false,
            remove_templates: false,
            remove_iframes: false,
            remove_svg: false,
            remove_canvas: false,
            remove_comments: false,
            remove_hidden: false,
        };
        let html = "<script>x()</script><!-- c --><p>Text</p>";
        assert_eq!(preprocess_html(html, &config), html);
    }

    #[test]
    fn test_selective_removal() {
        let config = PreprocessConfig { remove_scripts: false, ..Default::default() };
        let html = "<script>keep()</script><style>.a{}</style><p>Text</p>";
        let result = preprocess_html(html, &config);
        assert!(result.contains("keep()"));
        assert!(!result.contains(".a{}"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(preprocess_html("", &PreprocessConfig::default()), "");
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = "<p>Unclosed <b>bold <i>text</p><div";
        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(result.contains("Unclosed"));
    }
}
