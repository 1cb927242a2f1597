use thiserror::Error;

/// Failure to obtain the hit collection from the tracking endpoint
///
/// This is the only error the dashboard core knows about. It is caught at
/// the fetch boundary and never reaches aggregation or rendering.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("Failed to fetch hits: {0}")]
    Transport(#[from] reqwest::Error),
    /// Endpoint answered with a non-success status
    #[error("Failed to fetch hits: HTTP {0}")]
    Status(reqwest::StatusCode),
    /// Body was not a JSON array of hit records
    #[error("Failed to decode hits payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short machine-readable name, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
        }
    }
}
