use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("malformed tier table: {0}")]
    MalformedTierTable(#[from] TableDefect),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The first invariant a tier table was found to violate.
///
/// `index` is the zero-based row of the offending tier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableDefect {
    #[error("table has no tiers")]
    Empty,

    #[error("limit at tier {index} is not above the previous limit")]
    NotAscending { index: usize },

    #[error("no unbounded tier")]
    MissingSentinel,

    #[error("unbounded tier at {index} is not the last tier")]
    SentinelNotLast { index: usize },

    #[error("negative limit at tier {index}")]
    NegativeLimit { index: usize },

    #[error("rate at tier {index} is not positive")]
    NonPositiveRate { index: usize },

    #[error("rate at tier {index} is higher than the rate below it")]
    RateIncreases { index: usize },

    #[error("negative fee at tier {index}")]
    NegativeFee { index: usize },

    #[error("fee on tier {index}; only the first tier may carry a fee")]
    FeeOnUpperTier { index: usize },
}

pub type Result<T> = std::result::Result<T, TierError>;
