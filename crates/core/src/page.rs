//! Page context: the parsed page plus everything the sources may consult.
//!
//! A [`PageContext`] is built once per page load. Host integration points
//! (editor snapshot, page-builder preview, REST endpoint) are discovered
//! from the markup WordPress emits and can be overridden by the caller.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::parse::Document;

static PRELOAD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"createPreloadingMiddleware\(\s*").expect("valid preload regex"));

static API_SETTINGS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)wpApiSettings\s*=\s*(\{.*?\})\s*;").expect("valid settings regex"));

/// Where the page sits in the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// An admin or page-builder editing screen.
    Editor,
    /// A public-facing page.
    Frontend,
}

/// REST lookup for the rendered post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestEndpoint {
    /// Collection URL ending in `/`, e.g. `https://blog.test/wp-json/wp/v2/posts/`.
    pub base: Url,
    pub post_id: u64,
    /// Sent as `X-WP-Nonce` when present.
    pub nonce: Option<String>,
}

impl RestEndpoint {
    /// The posts collection under a REST root.
    ///
    /// Roots come in two shapes: a path such as `https://blog.test/wp-json/`
    /// (with or without the trailing slash) and the plain-permalink form
    /// `https://blog.test/?rest_route=/`, where the route lives in the query.
    pub fn posts_base(root: &Url) -> Url {
        append_route(root, "wp/v2/posts/")
    }

    /// The item URL `{base}{post_id}`.
    pub fn item_url(&self) -> Url {
        append_route(&self.base, &self.post_id.to_string())
    }
}

/// Appends `suffix` to the route of a REST URL as text, so the last path
/// segment and any `rest_route` query survive.
fn append_route(root: &Url, suffix: &str) -> Url {
    let mut url = root.clone();
    let pairs: Vec<(String, String)> = root.query_pairs().into_owned().collect();

    if let Some((_, route)) = pairs.iter().find(|(key, _)| key == "rest_route") {
        let route = format!("{}/{}", route.trim_end_matches('/'), suffix);
        url.query_pairs_mut().clear().extend_pairs(pairs.iter().map(|(key, value)| {
            if key == "rest_route" { (key.as_str(), route.as_str()) } else { (key.as_str(), value.as_str()) }
        }));
        return url;
    }

    let path = format!("{}/{}", root.path().trim_end_matches('/'), suffix);
    url.set_path(&path);
    url
}

/// Host integration points available to the sources.
#[derive(Debug, Clone, Default)]
pub struct HostBindings {
    /// Edited (possibly unsaved) post content from the block editor.
    pub editor_state: Option<String>,
    /// Markup of the page-builder preview document.
    pub preview_markup: Option<String>,
    pub rest: Option<RestEndpoint>,
}

impl HostBindings {
    /// Discovers bindings from the page markup.
    pub fn discover(document: &Document, url: &Url) -> Self {
        let scripts = document.inline_scripts();

        let editor_state = scripts.iter().find_map(|script| preloaded_post_content(script));

        let preview_markup = document
            .first_match(&["#elementor-preview-iframe"])
            .and_then(|frame| frame.attr("srcdoc").map(str::to_string))
            .filter(|markup| !markup.trim().is_empty());

        let rest = discover_post_id(document, url).and_then(|post_id| {
            let settings = scripts.iter().find_map(|script| api_settings(script));
            let root = settings
                .as_ref()
                .and_then(|s| s.root.as_deref())
                .and_then(|root| Url::parse(root).ok())
                .or_else(|| url.join("/wp-json/").ok())?;
            let base = RestEndpoint::posts_base(&root);
            let nonce = settings.and_then(|s| s.nonce).filter(|nonce| !nonce.is_empty());
            Some(RestEndpoint { base, post_id, nonce })
        });

        Self { editor_state, preview_markup, rest }
    }

    /// Overlays caller-supplied bindings; supplied fields win.
    pub fn merge(self, overrides: HostBindings) -> Self {
        Self {
            editor_state: overrides.editor_state.or(self.editor_state),
            preview_markup: overrides.preview_markup.or(self.preview_markup),
            rest: overrides.rest.or(self.rest),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiSettings {
    root: Option<String>,
    nonce: Option<String>,
}

fn api_settings(script: &str) -> Option<ApiSettings> {
    let captures = API_SETTINGS_PATTERN.captures(script)?;
    serde_json::from_str(&captures[1]).ok()
}

/// Pulls `content.raw` of the post out of the block editor's preload payload.
fn preloaded_post_content(script: &str) -> Option<String> {
    let start = PRELOAD_PATTERN.find(script)?.end();
    // The payload is followed by more script, so read exactly one JSON value.
    let payload = serde_json::Deserializer::from_str(&script[start..])
        .into_iter::<Value>()
        .next()?
        .ok()?;

    payload.as_object()?.iter().find_map(|(route, response)| {
        if !(route.starts_with("/wp/v2/posts/") || route.starts_with("/wp/v2/pages/")) {
            return None;
        }
        response
            .pointer("/body/content/raw")
            .and_then(Value::as_str)
            .filter(|raw| !raw.trim().is_empty())
            .map(str::to_string)
    })
}

fn discover_post_id(document: &Document, url: &Url) -> Option<u64> {
    let from_query = url
        .query_pairs()
        .find(|(key, _)| key == "post")
        .and_then(|(_, value)| value.parse().ok());

    let from_field = || {
        document
            .first_match(&["#post_ID"])
            .and_then(|field| field.form_value())
            .and_then(|value| value.trim().parse().ok())
    };

    let from_body_class = || {
        document.body_classes().iter().find_map(|class| {
            class
                .strip_prefix("postid-")
                .or_else(|| class.strip_prefix("page-id-"))
                .and_then(|id| id.parse().ok())
        })
    };

    from_query.or_else(from_field).or_else(from_body_class).filter(|id| *id > 0)
}

/// The page a summarization runs against.
pub struct PageContext {
    pub document: Document,
    pub url: Url,
    pub kind: PageKind,
    pub bindings: HostBindings,
}

impl PageContext {
    /// Parses the page and discovers its host bindings.
    pub fn new(html: &str, url: Url) -> Self {
        let document = Document::parse(html);
        let kind = detect_kind(&document, &url);
        let bindings = HostBindings::discover(&document, &url);
        Self { document, url, kind, bindings }
    }

    /// Replaces discovered bindings with any the caller supplies.
    pub fn with_bindings(mut self, overrides: HostBindings) -> Self {
        self.bindings = self.bindings.merge(overrides);
        self
    }
}

fn detect_kind(document: &Document, url: &Url) -> PageKind {
    if url.path().contains("/wp-admin/")
        || document.has_body_class("wp-admin")
        || document.has_body_class("elementor-editor-active")
    {
        PageKind::Editor
    } else {
        PageKind::Frontend
    }
}
