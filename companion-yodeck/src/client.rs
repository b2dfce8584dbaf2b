//! HTTP client for the Yodeck REST API.
//!
//! One thin authenticated wrapper: every call is a single request with no
//! retry. Non-success responses are folded into descriptive errors, pulling
//! apart the structured `{error: {...}}` body Yodeck returns when it can.

use crate::error::{Error, Result};
use crate::models::{
    extract_results, parse_summaries, MediaCreate, ResourceSummary, ScreenDetail, ScreenPatch,
    TakeoverContent, TakeoverRequest,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default Yodeck API base URL
pub const DEFAULT_API_BASE: &str = "https://app.yodeck.com/api/v2";

/// Default timeout for HTTP requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("companion-yodeck/", env!("CARGO_PKG_VERSION"));

/// Page size requested from listing endpoints
pub const LIST_PAGE_LIMIT: u32 = 100;

/// Parsed body of a successful API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
    /// 204 No Content
    Empty,
}

impl ApiBody {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Yodeck HTTP client
///
/// The client is stateless apart from its credential; choice lists and
/// selection state live in the module layer.
#[derive(Debug, Clone)]
pub struct YodeckClient {
    client: Client,
    api_base: String,
    api_key: String,
    timeout: Duration,
}

impl YodeckClient {
    /// Create a new client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the API base URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Issue one request against the API.
    ///
    /// Query pairs with a `None` value are skipped. Extra headers are merged
    /// over the defaults (authorization, accept, content type), caller keys
    /// winning.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, Option<String>)],
        body: Option<&Value>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<ApiBody> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            endpoint
        ))?;
        for (key, value) in query {
            if let Some(value) = value {
                url.query_pairs_mut().append_pair(key, value);
            }
        }

        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&format!("Token {}", self.api_key))
            .map_err(|e| Error::other(format!("API key is not a valid header value: {e}")))?;
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                headers.insert(name.clone(), value.clone());
            }
        }

        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers)
            .timeout(self.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        handle_response(method, &url, response).await
    }

    /// One page of a listing endpoint, ordered by name.
    async fn list(&self, resource: &'static str) -> Result<Vec<ResourceSummary>> {
        let body = self
            .request(
                Method::GET,
                resource,
                &[
                    ("limit", Some(LIST_PAGE_LIMIT.to_string())),
                    ("ordering", Some("name".to_string())),
                ],
                None,
                None,
            )
            .await?;
        let value = body.into_json().unwrap_or(Value::Null);
        Ok(parse_summaries(extract_results(value)))
    }

    pub async fn list_workspaces(&self) -> Result<Vec<ResourceSummary>> {
        self.list("workspaces").await
    }

    pub async fn list_screens(&self) -> Result<Vec<ResourceSummary>> {
        self.list("screens").await
    }

    pub async fn list_media(&self) -> Result<Vec<ResourceSummary>> {
        self.list("media").await
    }

    pub async fn list_playlists(&self) -> Result<Vec<ResourceSummary>> {
        self.list("playlists").await
    }

    pub async fn list_layouts(&self) -> Result<Vec<ResourceSummary>> {
        self.list("layouts").await
    }

    /// Fetch one screen's detail, including its workspace block.
    pub async fn screen_detail(&self, screen_id: u64) -> Result<ScreenDetail> {
        let body = self
            .request(Method::GET, &format!("screens/{screen_id}"), &[], None, None)
            .await?;
        match body.into_json() {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(Error::other(format!(
                "Screen {screen_id} detail response was not JSON"
            ))),
        }
    }

    /// Set or clear the takeover on a screen (`None` clears it).
    pub async fn set_takeover(
        &self,
        screen_id: u64,
        content: Option<TakeoverContent>,
    ) -> Result<()> {
        let payload = serde_json::to_value(TakeoverRequest {
            takeover_content: content,
        })?;
        self.request(
            Method::PUT,
            &format!("screens/{screen_id}/takeover"),
            &[],
            Some(&payload),
            None,
        )
        .await?;
        Ok(())
    }

    /// Tell a screen to fetch and apply its latest content immediately.
    pub async fn push_screen(&self, screen_id: u64) -> Result<()> {
        self.request(
            Method::POST,
            &format!("screens/{screen_id}/push"),
            &[],
            None,
            None,
        )
        .await?;
        Ok(())
    }

    /// Update a screen's persistent content.
    pub async fn patch_screen(&self, screen_id: u64, patch: &ScreenPatch) -> Result<()> {
        let payload = serde_json::to_value(patch)?;
        self.request(
            Method::PATCH,
            &format!("screens/{screen_id}"),
            &[],
            Some(&payload),
            None,
        )
        .await?;
        Ok(())
    }

    /// Create a media item from a URL.
    pub async fn create_media(&self, media: &MediaCreate) -> Result<ApiBody> {
        let payload = serde_json::to_value(media)?;
        self.request(Method::POST, "media", &[], Some(&payload), None)
            .await
    }
}

async fn handle_response(method: Method, url: &Url, response: Response) -> Result<ApiBody> {
    let status = response.status();

    if !status.is_success() {
        let detail = read_error_detail(response).await;
        let detail = if detail.is_empty() {
            String::new()
        } else {
            format!(" - {detail}")
        };
        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }
        return Err(Error::Api {
            method,
            path,
            status,
            detail,
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(ApiBody::Empty);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let text = response.text().await?;

    if content_type.contains("application/json") {
        return Ok(ApiBody::Json(serde_json::from_str(&text)?));
    }
    Ok(ApiBody::Text(text))
}

/// Best-effort reading of a failure body into one line of detail.
async fn read_error_detail(response: Response) -> String {
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return e.to_string(),
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => format_error_body(&json).unwrap_or_else(|| json.to_string()),
        Err(_) => text,
    }
}

/// Format the structured `{error: {message, code, details}}` body Yodeck
/// returns on failures; `None` when the body has no `error` object.
fn format_error_body(body: &Value) -> Option<String> {
    let error = body.get("error")?;

    let mut parts: Vec<String> = Vec::new();
    if let Some(message) = error.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            parts.push(message.to_string());
        }
    }

    let mut extra: Vec<String> = Vec::new();
    if let Some(code) = error.get("code") {
        if !code.is_null() {
            extra.push(format!("code={}", value_display(code)));
        }
    }
    if let Some(details) = error.get("details") {
        if let Some(reason) = details.get("reason").and_then(Value::as_str) {
            extra.push(format!("reason={reason}"));
        } else if !details.is_null() {
            extra.push(format!("details={details}"));
        }
    }
    if !extra.is_empty() {
        parts.push(format!("({})", extra.join(", ")));
    }

    let joined = parts.join(" ").trim().to_string();
    if joined.is_empty() {
        Some(error.to_string())
    } else {
        Some(joined)
    }
}

fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builder for configuring a YodeckClient
#[derive(Debug, Default)]
pub struct ClientBuilder {
    client: Option<Client>,
    api_base: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL (tests, staging)
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the API key (required)
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<YodeckClient> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(
                    self.user_agent
                        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                )
                .timeout(timeout)
                .build()?,
        };

        Ok(YodeckClient {
            client,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_requires_api_key() {
        assert!(matches!(
            ClientBuilder::default().build(),
            Err(Error::MissingApiKey)
        ));
        assert!(matches!(
            ClientBuilder::default().api_key("   ").build(),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let client = YodeckClient::new("secret").unwrap();
        assert_eq!(client.api_base(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_format_error_body_full() {
        let body = json!({
            "error": {
                "message": "Screen is offline",
                "code": 4203,
                "details": {"reason": "unreachable"}
            }
        });
        assert_eq!(
            format_error_body(&body).unwrap(),
            "Screen is offline (code=4203, reason=unreachable)"
        );
    }

    #[test]
    fn test_format_error_body_raw_details() {
        let body = json!({
            "error": {
                "message": "Invalid payload",
                "details": {"field": "source_id"}
            }
        });
        assert_eq!(
            format_error_body(&body).unwrap(),
            r#"Invalid payload (details={"field":"source_id"})"#
        );
    }

    #[test]
    fn test_format_error_body_without_error_object() {
        assert!(format_error_body(&json!({"detail": "not found"})).is_none());
    }

    #[test]
    fn test_format_error_body_empty_error_falls_back() {
        let body = json!({"error": {}});
        assert_eq!(format_error_body(&body).unwrap(), "{}");
    }
}
