pub mod action;
pub mod config;
pub mod dialog;
pub mod error;
pub mod fetch;
pub mod page;
pub mod parse;
pub mod prompt;
pub mod resolve;
pub mod sanitize;
pub mod sources;

pub use action::{
    BrowsingContext, ClipboardSink, ClipboardStatus, ControlState, Delivery, Launcher, Notice, Notifier, Outcome,
    PLACEHOLDER_HTML, Summarizer,
};
pub use config::{Config, ConfigBuilder};
pub use dialog::{DialogEvent, DialogState};
pub use error::{Result, SummaristError};
pub use fetch::FetchConfig;
pub use fetch::{fetch_file, fetch_stdin, fetch_url};
pub use page::{HostBindings, PageContext, PageKind, RestEndpoint};
pub use parse::{Document, Element};
pub use prompt::{build_prompt, chat_url, encode_component};
pub use resolve::{DEFAULT_DEADLINE, Resolver};
pub use sanitize::{SanitizeProfile, SanitizedText, sanitize, sanitize_with_profile};
pub use sources::{ContentSource, RawContent, SourceKind, default_sources};
