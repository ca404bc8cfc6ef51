/// Default MCP server web API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
/// Operator's own callsign sent with every QSO request.
pub const DEFAULT_MY_CALLSIGN: &str = "HB9BLA";
/// Operator's own Maidenhead locator sent with every QSO request.
pub const DEFAULT_MY_GRID: &str = "JN37VL";

/// Fixed settings handed to the client at construction.
///
/// Nothing reads these from disk or the environment; `Default` is what the
/// binary uses and tests override fields directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub my_callsign: String,
    pub my_grid: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            my_callsign: DEFAULT_MY_CALLSIGN.into(),
            my_grid: DEFAULT_MY_GRID.into(),
        }
    }
}

impl ClientConfig {
    /// Full URL for an API path such as `/slices`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Scheme, host and port of the server, used in the "cannot connect" message.
    pub fn server_origin(&self) -> String {
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(_) => self.base_url.clone(),
        }
    }
}
