use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

pub const MIME_JSON: &str = "application/json";

/// What the login flow needs from the network. Kept as a trait so the flow
/// can be exercised against a scripted backend.
#[async_trait]
pub trait AuthBackend {
    /// Posts form-urlencoded credentials to the given path and returns the
    /// decoded JSON body of a 2xx response.
    async fn login_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<Value, RequestError>;

    /// Issues a bearer-authenticated GET against the given path and returns
    /// the decoded JSON body of a 2xx response.
    async fn fetch_profile(&self, path: &str, token: &str) -> Result<Value, RequestError>;
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(#[source] anyhow::Error),

    #[error("server returned status {code}")]
    Status { code: u16, detail: Option<String> },

    #[error("server returned invalid json: {0:?}")]
    InvalidJson(String),
}

#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    client: reqwest::Client,
}

impl Client {
    pub fn connect(url: &str) -> Result<Self> {
        let url = url.trim_end_matches('/');
        let parsed = match Url::parse(url) {
            Ok(url) => url,
            Err(_) => bail!("invalid server url '{url}'"),
        };
        match parsed.scheme() {
            "http" | "https" => {}
            _ => bail!(
                "invalid url scheme, expect 'http' or 'https', not '{}'",
                parsed.scheme()
            ),
        }

        Ok(Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Asks the server whether it is alive. The backend exposes this on a
    /// conventional path and answers with a `{"message": ...}` body.
    pub async fn ping(&self) -> Result<String, RequestError> {
        let resp = self.get_json("ison", None).await?;
        let message = resp
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("server is up");
        Ok(message.to_string())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str, token: Option<&str>) -> Result<Value, RequestError> {
        let mut req = self
            .client
            .get(self.endpoint(path))
            .header("Accept", MIME_JSON);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => return Err(RequestError::Network(err.into())),
        };

        let code = resp.status();
        if !code.is_success() {
            return Err(RequestError::Status {
                code: code.as_u16(),
                detail: None,
            });
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(err) => return Err(RequestError::Network(err.into())),
        };
        match serde_json::from_str(&body) {
            Ok(data) => Ok(data),
            Err(_) => Err(RequestError::InvalidJson(body)),
        }
    }
}

#[async_trait]
impl AuthBackend for Client {
    async fn login_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<Value, RequestError> {
        // reqwest's form() sets Content-Type: application/x-www-form-urlencoded.
        let req = self
            .client
            .post(self.endpoint(path))
            .form(fields)
            .header("Accept", MIME_JSON);

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => return Err(RequestError::Network(err.into())),
        };

        let code = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(err) => return Err(RequestError::Network(err.into())),
        };

        if !code.is_success() {
            // Failure bodies optionally carry a human-readable detail field.
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .as_ref()
                .and_then(|v| v.get("detail"))
                .and_then(|d| d.as_str())
                .map(String::from);
            return Err(RequestError::Status {
                code: code.as_u16(),
                detail,
            });
        }

        match serde_json::from_str(&body) {
            Ok(data) => Ok(data),
            Err(_) => Err(RequestError::InvalidJson(body)),
        }
    }

    async fn fetch_profile(&self, path: &str, token: &str) -> Result<Value, RequestError> {
        self.get_json(path, Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_url_validation() {
        assert!(Client::connect("http://127.0.0.1:8000").is_ok());
        assert!(Client::connect("https://api.example.com").is_ok());
        assert!(Client::connect("ftp://api.example.com").is_err());
        assert!(Client::connect("not a url").is_err());
    }

    #[test]
    fn test_endpoint_join() {
        let client = Client::connect("http://api.test/").unwrap();
        assert_eq!(client.endpoint("auth/login"), "http://api.test/auth/login");
        assert_eq!(client.endpoint("/auth/me"), "http://api.test/auth/me");
    }
}
