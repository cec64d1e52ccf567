use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tier(#[from] tiers::TierError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stdin error: {0}")]
    Input(std::io::Error),

    #[error("output error: {0}")]
    Output(std::io::Error),

    #[error("output closed")]
    OutputClosed,
}
