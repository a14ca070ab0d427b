//! Content sources, tried in priority order by the [`Resolver`](crate::Resolver).
//!
//! Each source answers two questions about a [`PageContext`]: is my editing
//! surface present, and if so what markup does it hold. Structured editor
//! state comes first because it reflects unsaved edits; scraping the
//! rendered page comes last.

mod builder;
mod dom;
mod editor;
mod remote;

use std::fmt;

use async_trait::async_trait;

use crate::Result;
use crate::fetch::FetchConfig;
use crate::page::PageContext;

pub use builder::PageBuilderSource;
pub use dom::DomFallbackSource;
pub use editor::{BlockEditorSource, ClassicEditorSource, FormFieldSource};
pub use remote::RestSource;

/// Identifies which strategy produced a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    EditorState,
    PageBuilderPreview,
    LegacyEditor,
    FormField,
    RemoteFetch,
    DomFallback,
}

impl SourceKind {
    /// All kinds in resolution priority order.
    pub const PRIORITY: [SourceKind; 6] = [
        SourceKind::EditorState,
        SourceKind::PageBuilderPreview,
        SourceKind::LegacyEditor,
        SourceKind::FormField,
        SourceKind::RemoteFetch,
        SourceKind::DomFallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::EditorState => "editor-state",
            SourceKind::PageBuilderPreview => "page-builder-preview",
            SourceKind::LegacyEditor => "legacy-editor",
            SourceKind::FormField => "form-field",
            SourceKind::RemoteFetch => "remote-fetch",
            SourceKind::DomFallback => "dom-fallback",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markup produced by exactly one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    pub source: SourceKind,
    pub markup: String,
}

/// A strategy for locating article markup on a page.
///
/// Sources run on the page's single event loop, so their futures need not
/// be `Send`.
#[async_trait(?Send)]
pub trait ContentSource {
    fn kind(&self) -> SourceKind;

    /// Cheap presence check for this source's editing surface.
    fn is_available(&self, page: &PageContext) -> bool;

    /// Fetches the markup. `Ok(None)` means the surface held nothing usable.
    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>>;
}

/// The standard source list, in priority order.
pub fn default_sources(fetch: &FetchConfig) -> Result<Vec<Box<dyn ContentSource>>> {
    Ok(vec![
        Box::new(BlockEditorSource),
        Box::new(PageBuilderSource),
        Box::new(ClassicEditorSource),
        Box::new(FormFieldSource),
        Box::new(RestSource::new(fetch.client()?)),
        Box::new(DomFallbackSource),
    ])
}

fn non_empty(markup: String) -> Option<String> {
    if markup.trim().is_empty() { None } else { Some(markup) }
}
