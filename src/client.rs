use crate::config::ClientConfig;
use crate::errors::AppError;
use crate::model::{QsoRequest, Slice};
use crate::transport::Transport;
use log::{debug, info};
use serde_json::Value;

/// Client for the two MCP server endpoints this tool uses.
pub struct McpClient<T: Transport> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> McpClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        McpClient { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /slices`: a fresh snapshot of every slice and its decoded stations.
    pub fn fetch_slices(&self) -> Result<Vec<Slice>, AppError> {
        let url = self.config.endpoint("/slices");
        let body = self.transport.get_json(&url)?;
        let slices: Vec<Slice> = serde_json::from_value(body)?;
        debug!("snapshot: {} slices", slices.len());
        Ok(slices)
    }

    /// Request addressed from the configured operator to `target_callsign`.
    pub fn request_for(&self, instance_id: &str, target_callsign: &str) -> QsoRequest {
        QsoRequest {
            instance_id: instance_id.to_string(),
            target_callsign: target_callsign.to_string(),
            my_callsign: self.config.my_callsign.clone(),
            my_grid: self.config.my_grid.clone(),
        }
    }

    /// `POST /qso/execute`. Returns the server's acknowledgement untouched;
    /// the exchange itself runs on the server and is not observed here.
    pub fn execute_qso(&self, req: &QsoRequest) -> Result<Value, AppError> {
        let url = self.config.endpoint("/qso/execute");
        let body = serde_json::to_value(req)?;
        info!("requesting QSO {} -> {} on {}", req.my_callsign, req.target_callsign, req.instance_id);
        self.transport.post_json(&url, &body)
    }
}
