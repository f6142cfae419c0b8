#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Host transport error: {0}")]
    Transport(String),

    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),
}
