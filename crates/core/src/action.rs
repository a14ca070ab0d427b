//! The summarize action: resolve, sanitize, copy, and open the chat.
//!
//! [`Summarizer`] is the per-page context object. It owns the resolver and
//! the outward capabilities (browser, clipboard, notices) and tracks the
//! trigger control and dialog state between activations.
//!
//! The browsing context is opened before anything is awaited, mirroring how
//! browsers only honour popups opened inside the user's gesture. The handle
//! is consumed by either [`BrowsingContext::navigate`] or
//! [`BrowsingContext::close`], so it is used exactly once.

use std::cell::{Cell, RefCell};
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::dialog::{DialogEvent, DialogState};
use crate::page::PageContext;
use crate::prompt::{build_prompt, chat_url};
use crate::resolve::Resolver;
use crate::sanitize::sanitize_with_profile;
use crate::sources::{RawContent, SourceKind};
use crate::{Result, SummaristError};

/// Shown in the browsing context while the content is prepared.
pub const PLACEHOLDER_HTML: &str = "<html><head><title>Summarist</title></head>\
<body style=\"font-family:sans-serif;display:flex;justify-content:center;align-items:center;height:100vh\">\
<h2>Preparing AI Summary...</h2></body></html>";

pub const IDLE_LABEL: &str = "GPT Summarizer";
pub const BUSY_LABEL: &str = "Processing...";
pub const DONE_LABEL: &str = "Copied! Opening...";

const GENERIC_FAILURE: &str = "Error processing content.";
const COPIED_STATUS: &str = "Text copied to clipboard! Paste (Ctrl+V) if text is missing.";
const NOT_COPIED_STATUS: &str = "Clipboard unavailable; the chat opens with the shortened text only.";
const SKIPPED_STATUS: &str = "Prompt ready; the clipboard was left untouched.";

/// A browser tab or window opened for the result.
pub trait BrowsingContext {
    fn navigate(self: Box<Self>, url: &Url) -> Result<()>;
    fn close(self: Box<Self>);
}

/// Opens browsing contexts. Must not block: it runs inside the trigger turn.
pub trait Launcher {
    /// Opens a blank context showing `placeholder`.
    ///
    /// Returns [`SummaristError::PopupBlocked`] when no context can be opened.
    fn open_blank(&self, placeholder: &str) -> Result<Box<dyn BrowsingContext>>;
}

/// What became of the long prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardStatus {
    Copied,
    /// The sink was told not to touch the clipboard.
    Skipped,
    Failed,
}

impl ClipboardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipboardStatus::Copied => "copied",
            ClipboardStatus::Skipped => "skipped",
            ClipboardStatus::Failed => "failed",
        }
    }
}

#[async_trait(?Send)]
pub trait ClipboardSink {
    /// Returns [`ClipboardStatus::Copied`] or [`ClipboardStatus::Skipped`].
    /// An error is recorded as [`ClipboardStatus::Failed`].
    async fn write_text(&self, text: &str) -> Result<ClipboardStatus>;
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking notice: the action did not go through.
    Alert(String),
    /// Informational status line.
    Status(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Alert(message) | Notice::Status(message) => f.write_str(message),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Label and enabled state of the trigger control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub label: String,
    pub enabled: bool,
}

impl ControlState {
    pub fn idle(label: impl Into<String>) -> Self {
        Self { label: label.into(), enabled: true }
    }
}

/// What a completed action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub source: SourceKind,
    pub chat_url: Url,
    pub clipboard: ClipboardStatus,
    /// Whether the URL text hit its cap.
    pub url_truncated: bool,
    /// Whether the clipboard text hit its cap.
    pub clipboard_truncated: bool,
}

/// Result of one activation of the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Delivered(Delivery),
    /// No source produced content.
    Unavailable,
    PopupBlocked,
    /// Another action was still in flight.
    Ignored,
    Failed(String),
}

/// Per-page summarizer context.
pub struct Summarizer {
    config: Config,
    resolver: Resolver,
    launcher: Box<dyn Launcher>,
    clipboard: Box<dyn ClipboardSink>,
    notifier: Box<dyn Notifier>,
    control: RefCell<ControlState>,
    dialog: Cell<DialogState>,
}

impl Summarizer {
    pub fn new(
        config: Config, resolver: Resolver, launcher: Box<dyn Launcher>, clipboard: Box<dyn ClipboardSink>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            resolver,
            launcher,
            clipboard,
            notifier,
            control: RefCell::new(ControlState::idle(IDLE_LABEL)),
            dialog: Cell::new(DialogState::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn control(&self) -> ControlState {
        self.control.borrow().clone()
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog.get()
    }

    /// Feeds a UI event to the dialog and returns the new state.
    pub fn dispatch(&self, event: DialogEvent) -> DialogState {
        let next = self.dialog.get().transition(event);
        self.dialog.set(next);
        next
    }

    /// Runs the summarize action once.
    ///
    /// Never returns an error: every failure becomes a notice and an
    /// [`Outcome`], and the control is always restored afterwards.
    pub async fn trigger(&self, page: &PageContext) -> Outcome {
        if !self.control.borrow().enabled {
            debug!("summarize already in flight, ignoring trigger");
            return Outcome::Ignored;
        }

        let context = match self.launcher.open_blank(PLACEHOLDER_HTML) {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "could not open browsing context");
                self.notifier.notify(Notice::Alert(SummaristError::PopupBlocked.to_string()));
                return Outcome::PopupBlocked;
            }
        };

        let idle = self.control.replace(ControlState { label: BUSY_LABEL.to_string(), enabled: false });

        let outcome = self.run(page, context).await;

        tokio::time::sleep(self.config.reset_delay()).await;
        *self.control.borrow_mut() = idle;
        self.dispatch(DialogEvent::ActionCompleted);

        outcome
    }

    async fn run(&self, page: &PageContext, context: Box<dyn BrowsingContext>) -> Outcome {
        let Some(raw) = self.resolver.resolve(page).await else {
            context.close();
            self.notifier.notify(Notice::Alert(SummaristError::ExtractionUnavailable.to_string()));
            return Outcome::Unavailable;
        };
        info!(source = %raw.source, "content resolved");

        let delivery = match self.prepare(page, &raw).await {
            Ok(delivery) => delivery,
            Err(e) => {
                warn!(error = %e, "failed to prepare prompt");
                context.close();
                self.notifier.notify(Notice::Alert(GENERIC_FAILURE.to_string()));
                return Outcome::Failed(e.to_string());
            }
        };

        self.control.borrow_mut().label = DONE_LABEL.to_string();

        if let Err(e) = context.navigate(&delivery.chat_url) {
            warn!(error = %e, "failed to open chat");
            self.notifier.notify(Notice::Alert(GENERIC_FAILURE.to_string()));
            return Outcome::Failed(e.to_string());
        }

        let status = match delivery.clipboard {
            ClipboardStatus::Copied => COPIED_STATUS,
            ClipboardStatus::Skipped => SKIPPED_STATUS,
            ClipboardStatus::Failed => NOT_COPIED_STATUS,
        };
        self.notifier.notify(Notice::Status(status.to_string()));

        Outcome::Delivered(delivery)
    }

    /// Builds both prompt variants, copies the long one and returns the chat URL.
    async fn prepare(&self, page: &PageContext, raw: &RawContent) -> Result<Delivery> {
        let full_text = sanitize_with_profile(&raw.markup, &self.config.clipboard_profile())?;
        let full_prompt = build_prompt(&self.config.instruction, &page.url, &full_text);

        let clipboard = match self.clipboard.write_text(&full_prompt).await {
            Ok(ClipboardStatus::Skipped) => {
                debug!("clipboard left untouched");
                ClipboardStatus::Skipped
            }
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                ClipboardStatus::Failed
            }
        };

        let url_text = sanitize_with_profile(&raw.markup, &self.config.url_profile())?;
        let url_prompt = build_prompt(&self.config.instruction, &page.url, &url_text);
        let chat_url = chat_url(&self.config.chat_url, &url_prompt)?;

        Ok(Delivery {
            source: raw.source,
            chat_url,
            clipboard,
            url_truncated: url_text.truncated,
            clipboard_truncated: full_text.truncated,
        })
    }
}
