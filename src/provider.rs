use std::time::Duration;

use log::warn;
use serde_json::Value;

use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the external explanation service. The service takes a GROQ-style
/// query embedding the emoji and answers with a JSON object that may carry an
/// `explanation` field. One bounded-timeout POST per lookup miss, with at most
/// one retry on transport failure.
#[derive(Clone)]
pub struct ExplanationProvider {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl ExplanationProvider {
    pub fn new(url: &str, api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        ExplanationProvider {
            http,
            url: url.to_string(),
            api_key,
        }
    }

    /// Asks the provider to explain `emoji`. `Ok(None)` means the provider
    /// answered but had no explanation to offer; callers must not cache that.
    pub async fn fetch_explanation(&self, emoji: &str) -> Result<Option<String>, ApiError> {
        let query = format!(r#"*[_type == "emoji" && emoji == "{}"]"#, emoji);
        let body = serde_json::json!({ "query": query });

        let response = match self.post(&body).await {
            Ok(response) => response,
            Err(first) if first.is_timeout() || first.is_connect() => {
                warn!("explanation provider unreachable, retrying once: {}", first);
                self.post(&body).await?
            }
            Err(other) => return Err(other.into()),
        };

        let data: Value = response.json().await?;
        Ok(data
            .get("explanation")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn post(&self, body: &Value) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.http.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request.send().await
    }
}
