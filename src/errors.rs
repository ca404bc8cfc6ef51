use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("connectivity error: {0}")]
    Connectivity(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("usage error: {0}")]
    Usage(String),
    #[error("IO error: {0}")]
    IO(String),
}

impl AppError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, AppError::Connectivity(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            AppError::Connectivity(format!("{}", e))
        } else {
            AppError::Protocol(format!("{}", e))
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self { AppError::IO(format!("{}", e)) }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self { AppError::Protocol(format!("decode: {}", e)) }
}
