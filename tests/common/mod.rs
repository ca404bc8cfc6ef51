use qso_trigger::client::McpClient;
use qso_trigger::config::ClientConfig;
use qso_trigger::errors::AppError;
use qso_trigger::transport::Transport;
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

/// Canned server: `slices = None` behaves like a refused connection.
pub struct MockTransport {
    pub slices: Option<Value>,
    pub ack: Value,
    pub calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn serving(slices: Value) -> Self {
        MockTransport {
            slices: Some(slices),
            ack: json!({"success": true, "message": "QSO started"}),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn unreachable() -> Self {
        MockTransport { slices: None, ack: Value::Null, calls: Mutex::new(vec![]) }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method == "POST").collect()
    }
}

impl Transport for MockTransport {
    fn get_json(&self, url: &str) -> Result<Value, AppError> {
        self.calls.lock().unwrap().push(Call { method: "GET", url: url.to_string(), body: None });
        self.slices
            .clone()
            .ok_or_else(|| AppError::Connectivity("connection refused".into()))
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value, AppError> {
        self.calls.lock().unwrap().push(Call { method: "POST", url: url.to_string(), body: Some(body.clone()) });
        if self.slices.is_none() {
            return Err(AppError::Connectivity("connection refused".into()));
        }
        Ok(self.ack.clone())
    }
}

pub fn client(t: MockTransport) -> McpClient<MockTransport> {
    McpClient::new(t, ClientConfig::default())
}

pub fn slice_c(stations: Value) -> Value {
    json!([
        {"id": "A", "band": "40m", "dialFrequency": 7074000, "stations": [
            {"callsign": "F4XYZ", "grid": "JN18", "snr": -14, "message": "CQ F4XYZ JN18", "lastSeen": "12:00:00"}
        ]},
        {"id": "C", "band": "20m", "dialFrequency": 14074000, "stations": stations}
    ])
}
