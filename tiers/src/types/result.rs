use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Tier;

/// Outcome of resolving one amount against a tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierResult {
    /// Zero-based position of the selected tier in its table.
    pub index: usize,
    pub tier: Tier,
    pub amount: Decimal,
    pub rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    /// `amount * rate + fee`.
    pub computed_amount: Decimal,
}

impl TierResult {
    pub(crate) fn new(index: usize, tier: &Tier, amount: Decimal) -> Result<Self> {
        Ok(Self {
            index,
            tier: tier.clone(),
            amount,
            rate: tier.rate,
            fee: tier.fee,
            computed_amount: tier.charge(amount)?,
        })
    }

    pub fn is_lowest_tier(&self) -> bool {
        self.index == 0
    }
}
