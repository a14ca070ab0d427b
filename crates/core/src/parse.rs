//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! content sources to probe a page with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use summarist_core::parse::Document;
//!
//! let html = r#"<html><body class="single postid-7"><article><p>Body</p></article></body></html>"#;
//!
//! let doc = Document::parse(html);
//! assert!(doc.has_body_class("postid-7"));
//! let article = doc.first_match(&["article", "main"]).unwrap();
//! assert_eq!(article.inner_html(), "<p>Body</p>");
//! ```

use scraper::{Html, Selector};

use crate::{Result, SummaristError};

/// A parsed HTML page.
///
/// Wraps a `scraper::Html` tree. The tree is detached: nothing in it is
/// ever executed or rendered.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SummaristError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use summarist_core::parse::Document;
    ///
    /// let doc = Document::parse(r#"<p class="content">First</p><p class="content">Second</p>"#);
    /// assert_eq!(doc.select("p.content").unwrap().len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Returns the first element matched by the earliest selector in `selectors`.
    ///
    /// Selectors are tried in order, so the list doubles as a preference
    /// ranking. Invalid selectors are skipped.
    pub fn first_match(&'_ self, selectors: &[&str]) -> Option<Element<'_>> {
        selectors.iter().find_map(|selector| {
            let sel = Selector::parse(selector).ok()?;
            self.html.select(&sel).next().map(|el| Element { element: el })
        })
    }

    /// Returns true if the selector matches at least one element.
    pub fn exists(&self, selector: &str) -> bool {
        self.first_match(&[selector]).is_some()
    }

    /// Gets the class names on `<body>`.
    pub fn body_classes(&self) -> Vec<String> {
        self.first_match(&["body"])
            .and_then(|body| body.attr("class").map(str::to_string))
            .map(|class| class.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Returns true if `<body>` carries the given class.
    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes().iter().any(|c| c == class)
    }

    /// Gets the text of every inline `<script>` element (those without `src`).
    pub fn inline_scripts(&self) -> Vec<String> {
        self.select("script:not([src])")
            .map(|scripts| scripts.iter().map(Element::text).collect())
            .unwrap_or_default()
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        self.first_match(&["title"])
            .map(|el| el.text().trim().to_string())
            .filter(|title| !title.is_empty())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SummaristError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element. For a
    /// `<textarea>` this is its current value.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the form value of this element.
    ///
    /// Textareas report their text, other controls their `value` attribute.
    pub fn form_value(&self) -> Option<String> {
        if self.tag_name() == "textarea" {
            Some(self.text())
        } else {
            self.attr("value").map(str::to_string)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Hello World - My Blog</title>
            <script src="/wp-includes/js/jquery.js"></script>
            <script>var wpApiSettings = {"root":"https://blog.test/wp-json/"};</script>
        </head>
        <body class="post-template-default single postid-42">
            <main>
                <article class="post"><p>Paragraph 1</p></article>
            </main>
            <textarea id="content">&lt;p&gt;Draft&lt;/p&gt;</textarea>
            <input id="post_ID" type="hidden" value="42">
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_title() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Hello World - My Blog".to_string()));
    }

    #[test]
    fn test_first_match_respects_order() {
        let doc = Document::parse(SAMPLE_HTML);
        let el = doc.first_match(&[".missing", "main", "article"]).unwrap();
        assert_eq!(el.tag_name(), "main");
    }

    #[test]
    fn test_first_match_none() {
        let doc = Document::parse(SAMPLE_HTML);
        assert!(doc.first_match(&["#nope", ".nothing"]).is_none());
    }

    #[test]
    fn test_body_classes() {
        let doc = Document::parse(SAMPLE_HTML);
        assert!(doc.has_body_class("single"));
        assert!(doc.has_body_class("postid-42"));
        assert!(!doc.has_body_class("wp-admin"));
    }

    #[test]
    fn test_inline_scripts_skip_external() {
        let doc = Document::parse(SAMPLE_HTML);
        let scripts = doc.inline_scripts();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("wpApiSettings"));
    }

    #[test]
    fn test_form_values() {
        let doc = Document::parse(SAMPLE_HTML);
        let textarea = doc.first_match(&["#content"]).unwrap();
        assert_eq!(textarea.form_value(), Some("<p>Draft</p>".to_string()));

        let input = doc.first_match(&["#post_ID"]).unwrap();
        assert_eq!(input.form_value(), Some("42".to_string()));
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");
        assert!(matches!(result, Err(SummaristError::HtmlParseError(_))));
    }
}
