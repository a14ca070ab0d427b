//! Last-resort scrape of the rendered page.

use async_trait::async_trait;

use super::{ContentSource, SourceKind, non_empty};
use crate::Result;
use crate::page::PageContext;

const ARTICLE_ROOTS: [&str; 5] = ["article", ".entry-content", "#content", "main", "body"];

/// Takes the inner markup of the most article-like container.
pub struct DomFallbackSource;

#[async_trait(?Send)]
impl ContentSource for DomFallbackSource {
    fn kind(&self) -> SourceKind {
        SourceKind::DomFallback
    }

    fn is_available(&self, _page: &PageContext) -> bool {
        true
    }

    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>> {
        Ok(page
            .document
            .first_match(&ARTICLE_ROOTS)
            .map(|root| root.inner_html())
            .and_then(non_empty))
    }
}
