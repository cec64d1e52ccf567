//! Tier resolution: map an amount to the first tier whose limit covers it.
//!
//! Tables hold at most a handful of tiers, so a linear scan is used. The
//! comparison is `amount <= limit`: an amount exactly on a boundary belongs to
//! the lower tier.

use rust_decimal::Decimal;
use tracing::trace;

use crate::amount::check_amount;
use crate::error::{Result, TableDefect};
use crate::table::check_structure;
use crate::types::{Tier, TierResult};

/// Resolve `amount` against a slice that has not been through validation.
///
/// The slice's ordering and sentinel are checked on every call; prefer
/// [`TierTable::resolve`](crate::TierTable::resolve) for a table validated once
/// at load.
///
/// # Errors
///
/// * `TierError::InvalidAmount` if `amount` is negative or the charge overflows.
/// * `TierError::MalformedTierTable` if the slice is empty, unsorted, has
///   duplicate limits, or lacks a trailing unbounded tier.
pub fn resolve(tiers: &[Tier], amount: Decimal) -> Result<TierResult> {
    check_structure(tiers)?;
    select(tiers, amount)
}

/// Scan for the first covering tier. Callers guarantee the structure.
pub(crate) fn select(tiers: &[Tier], amount: Decimal) -> Result<TierResult> {
    let amount = check_amount(amount)?;

    let (index, tier) = tiers
        .iter()
        .enumerate()
        .find(|(_, tier)| tier.limit.contains(amount))
        .ok_or(TableDefect::MissingSentinel)?;

    trace!(%amount, index, limit = %tier.limit, rate = %tier.rate, "tier selected");
    TierResult::new(index, tier, amount)
}
