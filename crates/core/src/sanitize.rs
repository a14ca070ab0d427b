//! Sanitization of extracted markup into capped plain text.
//!
//! The pipeline is:
//!
//! 1. rewrite the markup as a detached stream, dropping denylisted elements
//!    (scripts, styles, embeds, form controls, and the widget's own container)
//! 2. strip `on*` event-handler attributes from what remains
//! 3. render the cleaned tree to plain text
//! 4. collapse horizontal whitespace and runs of blank lines
//! 5. cut to the destination cap and append a visible marker
//!
//! # Example
//!
//! ```rust
//! use summarist_core::sanitize::sanitize;
//!
//! let text = sanitize("<p>Hello <script>alert(1)</script>World</p>", 1500).unwrap();
//! assert_eq!(text.as_str(), "Hello World");
//! assert!(!text.truncated);
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::warn;

use crate::{Result, SummaristError};

/// Id of the container the widget injects into host pages.
pub const WIDGET_CONTAINER_ID: &str = "summarist-container";

/// Class the widget puts on its collapsed dialog.
pub const WIDGET_HIDDEN_CLASS: &str = "summarist-hidden";

/// Default cap for text embedded in the chat URL.
pub const URL_CAP: usize = 1500;

/// Default cap for text written to the clipboard.
pub const CLIPBOARD_CAP: usize = 16000;

const UNSAFE_ELEMENTS: [&str; 13] = [
    "script", "style", "noscript", "template", "iframe", "object", "embed", "applet", "form", "button", "input",
    "select", "textarea",
];

const PARAGRAPH_ELEMENTS: [&str; 18] = [
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "ul",
    "ol",
    "dl",
    "table",
    "figure",
    "section",
    "article",
    "aside",
    "hr",
];

const LINE_ELEMENTS: [&str; 10] = ["div", "li", "tr", "dt", "dd", "figcaption", "header", "footer", "main", "nav"];

static HORIZONTAL_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

static BLANK_LINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("valid regex"));

/// Per-destination sanitization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeProfile {
    /// Maximum characters kept before the marker is appended.
    pub max_length: usize,
    /// Suffix appended when text is cut.
    pub marker: String,
    /// Remove `on*` attributes before rendering.
    pub strip_event_handlers: bool,
    /// Also drop subtrees carrying the widget's hidden class.
    pub remove_hidden_widgets: bool,
}

impl SanitizeProfile {
    /// Profile for text embedded in the chat URL.
    pub fn url(max_length: usize) -> Self {
        Self {
            max_length,
            marker: "... [Content Truncated]".to_string(),
            strip_event_handlers: true,
            remove_hidden_widgets: true,
        }
    }

    /// Profile for the long clipboard copy.
    pub fn clipboard(max_length: usize) -> Self {
        Self {
            max_length,
            marker: format!("... [Content Truncated to {} chars]", max_length),
            strip_event_handlers: false,
            remove_hidden_widgets: false,
        }
    }

    fn denylist(&self) -> Vec<String> {
        let mut selectors: Vec<String> = UNSAFE_ELEMENTS.iter().map(|tag| tag.to_string()).collect();
        selectors.push(format!("#{}", WIDGET_CONTAINER_ID));
        if self.remove_hidden_widgets {
            selectors.push(format!(".{}", WIDGET_HIDDEN_CLASS));
        }
        selectors
    }
}

impl Default for SanitizeProfile {
    fn default() -> Self {
        Self::url(URL_CAP)
    }
}

/// Plain text ready for a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedText {
    pub text: String,
    /// Whether the cap cut the text and the marker was appended.
    pub truncated: bool,
}

impl SanitizedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Length in characters, marker included.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Sanitizes with the URL profile at the given cap.
///
/// The output is plain text, but feeding it back in parses it as HTML again.
/// Re-sanitizing is therefore a no-op only for text without markup-significant
/// characters: `x<y` opens a tag and `&amp;` decodes to `&` on the second pass.
pub fn sanitize(raw: &str, max_length: usize) -> Result<SanitizedText> {
    sanitize_with_profile(raw, &SanitizeProfile::url(max_length))
}

/// Runs the full pipeline with an explicit profile.
pub fn sanitize_with_profile(raw: &str, profile: &SanitizeProfile) -> Result<SanitizedText> {
    let cleaned = remove_unsafe_markup(raw, profile)?;
    let text = normalize_whitespace(&render_text(&cleaned));
    Ok(truncate(text, profile))
}

/// Drops denylisted elements (with their content) and event handlers.
fn remove_unsafe_markup(html: &str, profile: &SanitizeProfile) -> Result<String> {
    let denylist = profile.denylist();

    let mut handlers: Vec<_> = denylist
        .iter()
        .map(|selector| {
            lol_html::element!(selector, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    if profile.strip_event_handlers {
        handlers.push(lol_html::element!("*", |el| {
            let event_attrs: Vec<String> = el
                .attributes()
                .iter()
                .map(|attr| attr.name())
                .filter(|name| name.to_ascii_lowercase().starts_with("on"))
                .collect();
            for name in event_attrs {
                el.remove_attribute(&name);
            }
            Ok(())
        }));
    }

    let mut output = String::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| SummaristError::HtmlParseError(e.to_string()))?;
    rewriter.end().map_err(|e| SummaristError::HtmlParseError(e.to_string()))?;

    Ok(output)
}

/// Renders a cleaned fragment to text.
///
/// Text nodes are kept verbatim; block elements contribute line breaks so
/// paragraphs stay apart.
fn render_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut output = String::new();
    push_text(fragment.root_element(), &mut output);
    output
}

fn push_text(element: ElementRef<'_>, output: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            output.push_str(text);
            continue;
        }

        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };

        let name = child_element.value().name();
        if name == "br" {
            output.push('\n');
            continue;
        }

        let newlines = if PARAGRAPH_ELEMENTS.contains(&name) {
            2
        } else if LINE_ELEMENTS.contains(&name) {
            1
        } else {
            0
        };

        push_break(output, newlines);
        if name == "td" || name == "th" {
            output.push('\t');
        }
        push_text(child_element, output);
        push_break(output, newlines);
    }
}

/// Ensures `output` ends with at least `newlines` line breaks.
fn push_break(output: &mut String, newlines: usize) {
    if output.is_empty() {
        return;
    }
    let trailing = output.chars().rev().take_while(|c| *c == '\n').count();
    for _ in trailing..newlines {
        output.push('\n');
    }
}

fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = HORIZONTAL_RUNS.replace_all(&text, " ");
    let text = BLANK_LINE_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn truncate(text: String, profile: &SanitizeProfile) -> SanitizedText {
    let length = text.chars().count();
    if length <= profile.max_length {
        return SanitizedText { text, truncated: false };
    }

    warn!(length, cap = profile.max_length, "content truncated to fit destination");
    let mut cut: String = text.chars().take(profile.max_length).collect();
    cut.push_str(&profile.marker);
    SanitizedText { text: cut, truncated: true }
}
