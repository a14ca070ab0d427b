//! REST lookup of the rendered post body.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ContentSource, SourceKind, non_empty};
use crate::page::PageContext;
use crate::{Result, SummaristError};

/// Fetches `content.rendered` from the posts endpoint.
///
/// Non-2xx statuses and bodies without the field count as "no result";
/// only transport failures surface as errors.
pub struct RestSource {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    content: Option<RenderedField>,
}

#[derive(Debug, Deserialize)]
struct RenderedField {
    rendered: Option<String>,
}

impl RestSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn probe_error(reason: impl ToString) -> SummaristError {
        SummaristError::SourceProbe { kind: SourceKind::RemoteFetch, reason: reason.to_string() }
    }
}

#[async_trait(?Send)]
impl ContentSource for RestSource {
    fn kind(&self) -> SourceKind {
        SourceKind::RemoteFetch
    }

    fn is_available(&self, page: &PageContext) -> bool {
        page.bindings.rest.is_some()
    }

    async fn retrieve(&self, page: &PageContext) -> Result<Option<String>> {
        let Some(endpoint) = page.bindings.rest.as_ref() else {
            return Ok(None);
        };
        let url = endpoint.item_url();

        let mut request = self.client.get(url.clone()).header("Accept", "application/json");
        if let Some(nonce) = &endpoint.nonce {
            request = request.header("X-WP-Nonce", nonce);
        }

        let response = request.send().await.map_err(Self::probe_error)?;
        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "post lookup returned non-success status");
            return Ok(None);
        }

        match response.json::<PostResponse>().await {
            Ok(post) => Ok(post.content.and_then(|c| c.rendered).and_then(non_empty)),
            Err(e) => {
                debug!(%url, error = %e, "post lookup returned malformed body");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{HostBindings, RestEndpoint};
    use url::Url;

    fn page_for(server_url: &str, nonce: Option<&str>) -> PageContext {
        let endpoint = RestEndpoint {
            base: Url::parse(&format!("{}/wp-json/wp/v2/posts/", server_url)).unwrap(),
            post_id: 42,
            nonce: nonce.map(str::to_string),
        };
        PageContext::new("<html><body></body></html>", Url::parse("https://blog.test/?p=42").unwrap())
            .with_bindings(HostBindings { rest: Some(endpoint), ..Default::default() })
    }

    fn source() -> RestSource {
        RestSource::new(Client::new())
    }

    #[tokio::test]
    async fn test_rendered_content_with_nonce() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/wp-json/wp/v2/posts/42")
            .match_header("x-wp-nonce", "n0nce")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":42,"content":{"rendered":"<p>From REST</p>\n","protected":false}}"#)
            .create_async()
            .await;

        let page = page_for(&server.url(), Some("n0nce"));
        assert!(source().is_available(&page));
        assert_eq!(source().retrieve(&page).await.unwrap().as_deref(), Some("<p>From REST</p>\n"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_is_no_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wp-json/wp/v2/posts/42")
            .with_status(401)
            .with_body(r#"{"code":"rest_forbidden"}"#)
            .create_async()
            .await;

        let page = page_for(&server.url(), None);
        assert_eq!(source().retrieve(&page).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_field_is_no_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wp-json/wp/v2/posts/42")
            .with_status(200)
            .with_body(r#"{"id":42,"title":{"rendered":"Hi"}}"#)
            .create_async()
            .await;

        let page = page_for(&server.url(), None);
        assert_eq!(source().retrieve(&page).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_no_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wp-json/wp/v2/posts/42")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let page = page_for(&server.url(), None);
        assert_eq!(source().retrieve(&page).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_probe_error() {
        let page = page_for("http://127.0.0.1:9", None);
        let result = source().retrieve(&page).await;
        assert!(matches!(
            result,
            Err(SummaristError::SourceProbe { kind: SourceKind::RemoteFetch, .. })
        ));
    }

    #[test]
    fn test_unavailable_without_endpoint() {
        let page = PageContext::new("<html></html>", Url::parse("https://blog.test/").unwrap());
        assert!(!source().is_available(&page));
    }
}
