//! Extraction resolution.
//!
//! The [`Resolver`] walks its sources in priority order and returns the first
//! non-empty markup. The whole walk races a deadline: when the timer wins,
//! the walk future is dropped, so a source that answers late can never leak
//! into the result.

use std::time::Duration;

use tracing::{debug, warn};

use crate::Result;
use crate::fetch::FetchConfig;
use crate::page::PageContext;
use crate::sources::{ContentSource, RawContent, SourceKind, default_sources};

/// Default time budget for a full resolution.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(5000);

/// Ordered list of sources plus a deadline.
pub struct Resolver {
    sources: Vec<Box<dyn ContentSource>>,
    deadline: Duration,
}

impl Resolver {
    /// Sources are tried in the order given.
    pub fn new(sources: Vec<Box<dyn ContentSource>>, deadline: Duration) -> Self {
        Self { sources, deadline }
    }

    /// The standard six sources.
    pub fn with_defaults(fetch: &FetchConfig, deadline: Duration) -> Result<Self> {
        Ok(Self::new(default_sources(fetch)?, deadline))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|source| source.kind()).collect()
    }

    /// Returns the first non-empty content, or `None` when every source comes
    /// up empty or the deadline passes first.
    pub async fn resolve(&self, page: &PageContext) -> Option<RawContent> {
        match tokio::time::timeout(self.deadline, self.first_available(page)).await {
            Ok(found) => found,
            Err(_) => {
                warn!(deadline_ms = self.deadline.as_millis() as u64, "content resolution timed out");
                None
            }
        }
    }

    async fn first_available(&self, page: &PageContext) -> Option<RawContent> {
        for source in &self.sources {
            let kind = source.kind();
            if !source.is_available(page) {
                debug!(source = %kind, "source not present");
                continue;
            }

            match source.retrieve(page).await {
                Ok(Some(markup)) if !markup.trim().is_empty() => {
                    debug!(source = %kind, bytes = markup.len(), "content resolved");
                    return Some(RawContent { source: kind, markup });
                }
                Ok(_) => debug!(source = %kind, "source returned no content"),
                Err(e) => debug!(source = %kind, error = %e, "source failed, trying next"),
            }
        }

        debug!("all sources exhausted");
        None
    }
}
