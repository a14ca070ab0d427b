//! Page-builder preview frame.

use async_trait::async_trait;

use super::{ContentSource, SourceKind, non_empty};
use crate::Result;
use crate::page::PageContext;
use crate::parse::Document;

const PREVIEW_FRAME: &str = "#elementor-preview-iframe";
const PREVIEW_ROOTS: [&str; 3] = ["article", ".elementor-section-wrap", "body"];

/// Reads the page builder's live preview document.
pub struct PageBuilderSource;

#[async_trait(?Send)]
impl ContentSource for PageBuilderSource {
    fn kind(&self) -> SourceKind {
        SourceKind::PageBuilderPreview
    }

    fn is_available(&self, page: &PageContext) -> bool {
        let builder_active =
            page.document.has_body_class("elementor-editor-active") || page.document.exists(PREVIEW_FRAME);
        builder_active && page.bindings.preview_markup.is_some()
    }

    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>> {
        let Some(markup) = page.bindings.preview_markup.as_deref() else {
            return Ok(None);
        };

        let preview = Document::parse(markup);
        Ok(preview
            .first_match(&PREVIEW_ROOTS)
            .map(|root| root.inner_html())
            .and_then(non_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HostBindings;
    use url::Url;

    fn page(html: &str) -> PageContext {
        PageContext::new(html, Url::parse("https://blog.test/wp-admin/post.php?post=3&action=elementor").unwrap())
    }

    #[tokio::test]
    async fn test_preview_prefers_article() {
        let page = page(
            r#"<body class="elementor-editor-active">
                <iframe id="elementor-preview-iframe"
                    srcdoc="<body><nav>Menu</nav><article><p>Built page</p></article></body>"></iframe>
            </body>"#,
        );

        assert!(PageBuilderSource.is_available(&page));
        assert_eq!(PageBuilderSource.retrieve(&page).await.unwrap().as_deref(), Some("<p>Built page</p>"));
    }

    #[tokio::test]
    async fn test_preview_section_wrap_then_body() {
        let page = page(r#"<body class="elementor-editor-active"></body>"#).with_bindings(HostBindings {
            preview_markup: Some(r#"<div class="elementor-section-wrap"><h2>Hero</h2></div><footer>f</footer>"#.to_string()),
            ..Default::default()
        });

        assert_eq!(PageBuilderSource.retrieve(&page).await.unwrap().as_deref(), Some("<h2>Hero</h2>"));

        let bare = page_with_preview("<p>Only body</p>");
        assert_eq!(PageBuilderSource.retrieve(&bare).await.unwrap().as_deref(), Some("<p>Only body</p>"));
    }

    fn page_with_preview(markup: &str) -> PageContext {
        page(r#"<body class="elementor-editor-active"></body>"#)
            .with_bindings(HostBindings { preview_markup: Some(markup.to_string()), ..Default::default() })
    }

    #[test]
    fn test_unavailable_without_builder() {
        let page = page("<body><article>x</article></body>")
            .with_bindings(HostBindings { preview_markup: Some("<p>x</p>".to_string()), ..Default::default() });
        assert!(!PageBuilderSource.is_available(&page));
    }

    #[test]
    fn test_unavailable_without_preview_document() {
        let page = page(r#"<body class="elementor-editor-active"></body>"#);
        assert!(!PageBuilderSource.is_available(&page));
    }
}
