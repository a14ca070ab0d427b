//! Desktop implementations of the summarizer's outward capabilities.

use async_trait::async_trait;
use summarist_core::{
    BrowsingContext, ClipboardSink, ClipboardStatus, Launcher, Notice, Notifier, Result, SummaristError,
};
use tracing::debug;
use url::Url;

use crate::echo::{print_error, print_success};

/// Opens the chat in the system browser.
///
/// A desktop browser cannot be handed a blank tab and steered later, so the
/// returned context only records the reservation and launches on navigate.
pub struct BrowserLauncher;

struct BrowserTab;

impl Launcher for BrowserLauncher {
    fn open_blank(&self, placeholder: &str) -> Result<Box<dyn BrowsingContext>> {
        debug!(bytes = placeholder.len(), "reserving browser tab");
        Ok(Box::new(BrowserTab))
    }
}

impl BrowsingContext for BrowserTab {
    fn navigate(self: Box<Self>, url: &Url) -> Result<()> {
        open::that(url.as_str()).map_err(|e| SummaristError::Launch { url: url.to_string(), reason: e.to_string() })
    }

    fn close(self: Box<Self>) {
        debug!("released browser tab without opening it");
    }
}

/// Prints the chat URL instead of opening it.
pub struct PrintLauncher;

struct PrintTab;

impl Launcher for PrintLauncher {
    fn open_blank(&self, _placeholder: &str) -> Result<Box<dyn BrowsingContext>> {
        Ok(Box::new(PrintTab))
    }
}

impl BrowsingContext for PrintTab {
    fn navigate(self: Box<Self>, url: &Url) -> Result<()> {
        println!("{}", url);
        Ok(())
    }

    fn close(self: Box<Self>) {}
}

/// Receives the full prompt: echoes it to stdout, copies it to the system
/// clipboard, or both.
pub struct PromptSink {
    pub echo: bool,
    pub copy: bool,
}

#[async_trait(?Send)]
impl ClipboardSink for PromptSink {
    async fn write_text(&self, text: &str) -> Result<ClipboardStatus> {
        if self.echo {
            println!("{}", text);
        }

        if !self.copy {
            return Ok(ClipboardStatus::Skipped);
        }

        let mut clipboard = arboard::Clipboard::new().map_err(|e| SummaristError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| SummaristError::Clipboard(e.to_string()))?;
        Ok(ClipboardStatus::Copied)
    }
}

/// Shows notices on stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Alert(message) => print_error(&message),
            Notice::Status(message) => print_success(&message),
        }
    }
}
