//! Completion sources
//!
//! Where the controller gets its suggestions from. The production
//! source talks to the service's own /suggest endpoint; tests swap in
//! canned implementations.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use url::Url;

/// A provider of prefix completions
#[async_trait]
pub trait SuggestSource: Send + Sync + 'static {
    /// Fetch completions for a prefix, best first
    async fn complete(&self, prefix: &str) -> Result<Vec<String>>;
}

/// [`SuggestSource`] backed by the /suggest endpoint over HTTP
pub struct HttpSuggestSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSuggestSource {
    /// Point a source at a service base URL such as `http://localhost:8080`
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client: reqwest::Client::new(),
            url: Url::parse(&base)?.join("suggest")?,
        })
    }
}

#[async_trait]
impl SuggestSource for HttpSuggestSource {
    async fn complete(&self, prefix: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&json!({ "query": prefix }))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;

        // Same posture as the server toward the engine: a strange body
        // means no suggestions, not a failure
        let suggestions = body
            .get("suggestions")
            .and_then(|terms| terms.as_array())
            .map(|terms| {
                terms
                    .iter()
                    .filter_map(|term| term.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_source_posts_query_and_reads_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest"))
            .and(body_json(json!({ "query": "ap" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "suggestions": ["apple", "apricot"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpSuggestSource::new(&server.uri()).unwrap();
        let suggestions = source.complete("ap").await.unwrap();
        assert_eq!(suggestions, ["apple", "apricot"]);
    }

    #[tokio::test]
    async fn test_http_source_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "suggest failed", "suggestions": []
            })))
            .mount(&server)
            .await;

        let source = HttpSuggestSource::new(&server.uri()).unwrap();
        assert!(source.complete("ap").await.is_err());
    }

    #[tokio::test]
    async fn test_http_source_tolerates_strange_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nope": 1 })))
            .mount(&server)
            .await;

        let source = HttpSuggestSource::new(&server.uri()).unwrap();
        let suggestions = source.complete("ap").await.unwrap();
        assert!(suggestions.is_empty());
    }
}
