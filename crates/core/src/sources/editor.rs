//! Sources backed by the CMS's own editing surfaces.

use async_trait::async_trait;

use super::{ContentSource, SourceKind, non_empty};
use crate::Result;
use crate::page::PageContext;

/// Edited post content held by the block editor.
pub struct BlockEditorSource;

#[async_trait(?Send)]
impl ContentSource for BlockEditorSource {
    fn kind(&self) -> SourceKind {
        SourceKind::EditorState
    }

    fn is_available(&self, page: &PageContext) -> bool {
        page.bindings.editor_state.is_some()
    }

    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>> {
        Ok(page.bindings.editor_state.clone().and_then(non_empty))
    }
}

/// The classic (TinyMCE) editor, only while its visual tab is active.
pub struct ClassicEditorSource;

const CLASSIC_WRAP: &str = "#wp-content-wrap.tmce-active";
const CLASSIC_AREA: &str = "textarea.wp-editor-area";

#[async_trait(?Send)]
impl ContentSource for ClassicEditorSource {
    fn kind(&self) -> SourceKind {
        SourceKind::LegacyEditor
    }

    fn is_available(&self, page: &PageContext) -> bool {
        page.document.exists(CLASSIC_WRAP) && page.document.exists(CLASSIC_AREA)
    }

    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>> {
        Ok(page
            .document
            .first_match(&[CLASSIC_AREA])
            .and_then(|area| area.form_value())
            .and_then(non_empty))
    }
}

/// The raw `#content` form field.
pub struct FormFieldSource;

#[async_trait(?Send)]
impl ContentSource for FormFieldSource {
    fn kind(&self) -> SourceKind {
        SourceKind::FormField
    }

    fn is_available(&self, page: &PageContext) -> bool {
        page.document
            .first_match(&["#content"])
            .and_then(|field| field.form_value())
            .is_some_and(|value| !value.is_empty())
    }

    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>> {
        Ok(page
            .document
            .first_match(&["#content"])
            .and_then(|field| field.form_value())
            .and_then(non_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HostBindings;
    use url::Url;

    fn page(html: &str) -> PageContext {
        PageContext::new(html, Url::parse("https://blog.test/wp-admin/post.php?post=1").unwrap())
    }

    #[tokio::test]
    async fn test_block_editor_snapshot() {
        let page = page("<html></html>")
            .with_bindings(HostBindings { editor_state: Some("<p>Unsaved</p>".to_string()), ..Default::default() });

        assert!(BlockEditorSource.is_available(&page));
        assert_eq!(BlockEditorSource.retrieve(&page).await.unwrap().as_deref(), Some("<p>Unsaved</p>"));
    }

    #[tokio::test]
    async fn test_block_editor_absent() {
        let page = page("<html><body></body></html>");
        assert!(!BlockEditorSource.is_available(&page));
        assert_eq!(BlockEditorSource.retrieve(&page).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_classic_editor_visual_mode() {
        let page = page(
            r#"<div id="wp-content-wrap" class="wp-core-ui wp-editor-wrap tmce-active">
                <textarea class="wp-editor-area" id="content">&lt;p&gt;Classic&lt;/p&gt;</textarea>
            </div>"#,
        );

        assert!(ClassicEditorSource.is_available(&page));
        assert_eq!(ClassicEditorSource.retrieve(&page).await.unwrap().as_deref(), Some("<p>Classic</p>"));
    }

    #[test]
    fn test_classic_editor_text_mode_is_hidden() {
        let page = page(
            r#"<div id="wp-content-wrap" class="wp-core-ui wp-editor-wrap html-active">
                <textarea class="wp-editor-area" id="content">&lt;p&gt;Classic&lt;/p&gt;</textarea>
            </div>"#,
        );

        assert!(!ClassicEditorSource.is_available(&page));
        assert!(FormFieldSource.is_available(&page));
    }

    #[tokio::test]
    async fn test_form_field_input_value() {
        let page = page(r#"<input id="content" value="&lt;p&gt;Field&lt;/p&gt;">"#);
        assert!(FormFieldSource.is_available(&page));
        assert_eq!(FormFieldSource.retrieve(&page).await.unwrap().as_deref(), Some("<p>Field</p>"));
    }

    #[test]
    fn test_form_field_ignores_content_div() {
        let page = page(r#"<div id="content"><p>Theme wrapper</p></div>"#);
        assert!(!FormFieldSource.is_available(&page));
    }

    #[test]
    fn test_form_field_empty_textarea() {
        let page = page(r#"<textarea id="content"></textarea>"#);
        assert!(!FormFieldSource.is_available(&page));
    }
}
