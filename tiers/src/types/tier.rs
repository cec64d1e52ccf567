use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TierError};
use crate::types::Limit;

/// One pricing band: amounts up to `limit` are charged `amount * rate + fee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub limit: Limit,
    pub rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
}

impl Tier {
    pub fn new(limit: Limit, rate: Decimal) -> Self {
        Self {
            limit,
            rate,
            fee: None,
        }
    }

    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Flat fee, zero when the tier has none.
    pub fn fee_or_zero(&self) -> Decimal {
        self.fee.unwrap_or(Decimal::ZERO)
    }

    /// `amount * rate + fee`.
    ///
    /// # Errors
    ///
    /// Returns `TierError::InvalidAmount` if the charge overflows `Decimal`.
    pub fn charge(&self, amount: Decimal) -> Result<Decimal> {
        amount
            .checked_mul(self.rate)
            .and_then(|v| v.checked_add(self.fee_or_zero()))
            .ok_or_else(|| TierError::InvalidAmount(format!("{amount} is too large to price")))
    }
}
