use super::netrc::Credentials;
use super::{ClientCreateSnafu, Error, HttpSnafu, InvalidResponseFormatSnafu};
use crate::data::api_url::ApiUrl;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::ClientBuilder;
use serde_json::Value;
use snafu::ResultExt;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Issues GET requests against the SIM API and returns the parsed
/// JSON bodies.
///
/// The underlying reqwest client holds the connection pool. It is
/// released when the transport is dropped.
pub struct Transport {
    client: reqwest::Client,
    base_url: ApiUrl,
    credentials: Option<Credentials>,
}

impl Transport {
    pub fn new(
        base_url: ApiUrl,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Transport, Error> {
        log::debug!(
            "Create transport for {} (timeout {:?}, authenticated: {})",
            base_url,
            timeout,
            credentials.is_some()
        );
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context(ClientCreateSnafu)?;
        Ok(Transport {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Runs a GET request to the endpoint made of the given path
    /// segments and query pairs.
    ///
    /// A 2xx response must carry a JSON body. Any other status is
    /// returned as `Error::ApiRequestFailed` with the response body.
    pub async fn get_json(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Value, Error> {
        let url = self.base_url.endpoint(segments, query).to_string();
        log::debug!("GET {}", url);

        let mut req = self.client.get(&url);
        if let Some(creds) = &self.credentials {
            req = req.basic_auth(&creds.login, Some(&creds.password));
        }
        let resp = req.send().await.context(HttpSnafu { url: &url })?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = resp.bytes().await.context(HttpSnafu { url: &url })?;
        log::debug!("GET {} -> {}", url, status.as_u16());
        log::trace!("GET {} body: {}", url, String::from_utf8_lossy(&bytes));

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            let message = error_message(&body, &content_type, status.as_u16());
            log::info!("GET {} failed: {}", url, message);
            return Err(Error::ApiRequestFailed {
                url,
                status: status.as_u16(),
                body,
                message,
            });
        }
        serde_json::from_slice::<Value>(&bytes).context(InvalidResponseFormatSnafu { url })
    }
}

/// Picks a readable message from an error response: the first non-empty
/// `message` or `error` field of a JSON body, else the body itself.
fn error_message(body: &str, content_type: &str, status: u16) -> String {
    if content_type.contains("json") {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
            let field = ["message", "error"].iter().find_map(|k| match map.get(*k) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.is_empty() => None,
                Some(v) => Some(v),
            });
            match field {
                Some(Value::String(s)) => return s.clone(),
                Some(other) => return other.to_string(),
                None => {}
            }
        }
    }
    let text = body.trim();
    if text.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        text.to_string()
    }
}
