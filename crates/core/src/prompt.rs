//! Prompt text and the outbound chat URL.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::sanitize::SanitizedText;
use crate::{Result, SummaristError};

/// Characters left alone by `encodeURIComponent`; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Query parameter the chat service reads the prompt from.
pub const PROMPT_PARAM: &str = "q";

/// Builds `"{instruction} {page_url} ;\n\n{text}"`.
pub fn build_prompt(instruction: &str, page_url: &Url, text: &SanitizedText) -> String {
    format!("{} {} ;\n\n{}", instruction, page_url, text)
}

/// Percent-encodes a URI component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Embeds the prompt as the `q` parameter of the chat URL.
///
/// Any existing query on `chat_url` is replaced.
pub fn chat_url(chat_url: &str, prompt: &str) -> Result<Url> {
    let mut url = Url::parse(chat_url).map_err(|e| SummaristError::InvalidUrl(e.to_string()))?;
    url.set_query(Some(&format!("{}={}", PROMPT_PARAM, encode_component(prompt))));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SanitizedText {
        SanitizedText { text: s.to_string(), truncated: false }
    }

    #[test]
    fn test_prompt_format() {
        let page = Url::parse("https://blog.test/hello-world/").unwrap();
        let prompt = build_prompt("Summarize this article", &page, &text("Hello World"));
        assert_eq!(prompt, "Summarize this article https://blog.test/hello-world/ ;\n\nHello World");
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("a b&c=d/e?f#g"), "a%20b%26c%3Dd%2Fe%3Ff%23g");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode_component("line\n\nnext"), "line%0A%0Anext");
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_chat_url() {
        let url = chat_url("https://chat.openai.com/", "Summarize this article https://blog.test/ ;\n\nHi").unwrap();
        assert_eq!(
            url.as_str(),
            "https://chat.openai.com/?q=Summarize%20this%20article%20https%3A%2F%2Fblog.test%2F%20%3B%0A%0AHi"
        );

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded, vec![("q".to_string(), "Summarize this article https://blog.test/ ;\n\nHi".to_string())]);
    }

    #[test]
    fn test_chat_url_replaces_existing_query() {
        let url = chat_url("https://chat.example/?model=x", "hi").unwrap();
        assert_eq!(url.query(), Some("q=hi"));
    }

    #[test]
    fn test_chat_url_invalid_base() {
        assert!(matches!(chat_url("not a url", "hi"), Err(SummaristError::InvalidUrl(_))));
    }
}
