//! Gemini API client for text generation.
//!
//! Sends a single prompt to the `generateContent` endpoint and hands back the
//! parsed response body untouched. Reading text out of that body is left to
//! [`GenerateContentResponse`]'s accessors, which never fail.

use crate::error::Error;
use log::*;
use serde::Serialize;
use serde_json::Value;
use service::config::Config;

/// Message used when the Gemini API fails without saying why.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Gemini API request failed";

pub const MISSING_API_KEY_MESSAGE: &str = "Missing GEMINI_API_KEY in environment";

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// A request carrying one content entry with a single text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

/// Parsed `generateContent` response.
///
/// Gemini documents no field of this body as guaranteed, so it is kept as raw JSON
/// and every accessor walks it as a chain of optional lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateContentResponse(Value);

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if every step of the path exists
    /// and holds the expected JSON type.
    pub fn first_candidate_text(&self) -> Option<&str> {
        self.0
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .get(0)?
            .get("text")?
            .as_str()
    }

    /// The API's own `error.message`, when the body carries one.
    pub fn error_message(&self) -> Option<&str> {
        self.0.get("error")?.get("message")?.as_str()
    }

    fn has_error(&self) -> bool {
        self.0.get("error").is_some_and(|err| !err.is_null())
    }
}

impl From<Value> for GenerateContentResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client on top of the shared HTTP `client`. Fails with a
    /// config error, before any network activity, when no API key is configured.
    pub fn new(config: &Config, client: reqwest::Client) -> Result<Self, Error> {
        let api_key = config.gemini_api_key().ok_or_else(|| {
            error!("Gemini API key not configured");
            Error::config(MISSING_API_KEY_MESSAGE)
        })?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url().trim_end_matches('/').to_string(),
            model: config.gemini_model().to_string(),
            api_key,
        })
    }

    /// Send `prompt` to Gemini and wait for the complete response body.
    ///
    /// The call only succeeds when the status is 2xx, the body is JSON and the body
    /// holds no `error` object. Every other outcome is an upstream error carrying
    /// Gemini's `error.message` when one is present.
    pub async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse, Error> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(
            "Requesting summary from model {} ({} prompt bytes)",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Failed to send Gemini request: {e:?}");
                Error::upstream(UPSTREAM_FAILURE_MESSAGE).with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            warn!("Failed to read Gemini response body: {e:?}");
            Error::upstream(UPSTREAM_FAILURE_MESSAGE).with_source(e)
        })?;

        let parsed = match serde_json::from_str::<Value>(&body) {
            Ok(value) => GenerateContentResponse::from(value),
            Err(e) => {
                warn!("Gemini returned a non-JSON body with status {status}");
                return Err(Error::upstream(UPSTREAM_FAILURE_MESSAGE).with_source(e));
            }
        };

        if status.is_success() && !parsed.has_error() {
            info!("Gemini responded with status {status}");
            return Ok(parsed);
        }

        let message = parsed.error_message().unwrap_or(UPSTREAM_FAILURE_MESSAGE);
        warn!("Gemini API error: {status} - {message}");
        Err(Error::upstream(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind, InternalErrorKind};
    use clap::Parser;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const PATH: &str = "/models/gemini-pro:generateContent";

    fn test_config(base_url: &str, api_key: Option<&str>) -> Config {
        Config::parse_from(["meeting_notes_relay", "--gemini-model", "gemini-pro"])
            .set_gemini_base_url(base_url)
            .set_gemini_api_key(api_key.map(str::to_string))
    }

    fn test_client(base_url: &str, api_key: &str) -> GeminiClient {
        GeminiClient::new(&test_config(base_url, Some(api_key)), reqwest::Client::new()).unwrap()
    }

    fn upstream_message(err: Error) -> String {
        match err.error_kind {
            DomainErrorKind::External(ExternalErrorKind::Upstream(msg)) => msg,
            other => panic!("Expected Upstream error, got: {other:?}"),
        }
    }

    #[test]
    fn test_request_serializes_to_contents_parts_text() {
        let request = GenerateContentRequest::from_prompt("Summarize this meeting");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "Summarize this meeting" }] }] })
        );
    }

    #[test]
    fn test_first_candidate_text_tolerates_wrong_shapes() {
        let shapes = [
            json!({}),
            json!({ "candidates": "not-a-list" }),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": null }] }),
            json!({ "candidates": [{ "content": { "parts": {} } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] }),
            json!([1, 2, 3]),
        ];

        for shape in shapes {
            let response = GenerateContentResponse::from(shape.clone());
            assert_eq!(response.first_candidate_text(), None, "shape: {shape}");
        }
    }

    #[test]
    fn test_client_creation_fails_without_api_key() {
        let config = test_config("http://127.0.0.1:9", None);
        let err = GeminiClient::new(&config, reqwest::Client::new())
            .err()
            .expect("expected config error");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config(
                MISSING_API_KEY_MESSAGE.to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "contents": [{ "parts": [{ "text": "Summarize: standup" }] }]
            })))
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [{ "content": { "parts": [{ "text": "Short standup." }], "role": "model" } }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server.url(), "test-key");
        let response = client.generate_content("Summarize: standup").await.unwrap();

        assert_eq!(response.first_candidate_text(), Some("Short standup."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_content_forwards_error_message_from_non_2xx() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(
                json!({
                    "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server.url(), "bad-key");
        let err = client.generate_content("prompt").await.unwrap_err();

        assert_eq!(upstream_message(err), "API key not valid.");
    }

    #[tokio::test]
    async fn test_generate_content_treats_error_payload_in_200_as_upstream_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "error": { "message": "Model is overloaded" } }).to_string())
            .create_async()
            .await;

        let client = test_client(&server.url(), "test-key");
        let err = client.generate_content("prompt").await.unwrap_err();

        assert_eq!(upstream_message(err), "Model is overloaded");
    }

    #[tokio::test]
    async fn test_generate_content_uses_generic_message_for_unparseable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = test_client(&server.url(), "test-key");
        let err = client.generate_content("prompt").await.unwrap_err();

        assert_eq!(upstream_message(err), UPSTREAM_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_content_uses_generic_message_for_error_without_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(json!({ "error": { "code": 500 } }).to_string())
            .create_async()
            .await;

        let client = test_client(&server.url(), "test-key");
        let err = client.generate_content("prompt").await.unwrap_err();

        assert_eq!(upstream_message(err), UPSTREAM_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_content_transport_failure_uses_generic_message() {
        // Nothing listens on the discard port, so the request never gets a response.
        let client = test_client("http://127.0.0.1:9", "test-key");
        let err = client.generate_content("prompt").await.unwrap_err();

        assert!(err.source.is_some());
        assert!(!err.message().contains("test-key"));
        assert_eq!(upstream_message(err), UPSTREAM_FAILURE_MESSAGE);
    }
}
