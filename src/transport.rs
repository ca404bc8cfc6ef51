use crate::errors::AppError;
use log::debug;
use reqwest::blocking::{Client, Response};
use serde_json::Value;

/// Blocking JSON request/response over some wire.
///
/// `HttpTransport` talks to the real server; tests plug in a recording fake.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value, AppError>;
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, AppError>;
}

/// `reqwest` blocking client with the transport's default timeout and no retries.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport { client: Client::new() }
    }

    fn decode(method: &str, url: &str, resp: Response) -> Result<Value, AppError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::Protocol(format!(
                "{} {} returned {}: {}",
                method,
                url,
                status,
                body.trim()
            )));
        }
        resp.json::<Value>()
            .map_err(|e| AppError::Protocol(format!("{} {}: malformed body: {}", method, url, e)))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value, AppError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        Self::decode("GET", url, resp)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value, AppError> {
        debug!("POST {} {}", url, body);
        let resp = self.client.post(url).json(body).send()?;
        Self::decode("POST", url, resp)
    }
}
