//! Validated tier tables.
//!
//! A [`TierTable`] can only be built through [`TierTable::new`] (or
//! [`TierTable::from_unsorted`]), which checks every table invariant once so
//! that per-amount resolution never has to.

use std::slice;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::{amount_from_f64, parse_amount};
use crate::error::{Result, TableDefect, TierError};
use crate::resolve::select;
use crate::types::{Limit, Tier, TierResult};

/// Ordered tiers, ascending by limit, ending in exactly one unbounded tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Validate `tiers` as given.
    ///
    /// # Errors
    ///
    /// Returns `TierError::MalformedTierTable` naming the first violated invariant.
    pub fn new(tiers: Vec<Tier>) -> Result<Self> {
        validate(&tiers)?;
        debug!(tiers = tiers.len(), "tier table validated");
        Ok(Self { tiers })
    }

    /// Sort `tiers` ascending by limit, then validate.
    ///
    /// Duplicate limits and a misplaced fee are still rejected.
    pub fn from_unsorted(mut tiers: Vec<Tier>) -> Result<Self> {
        tiers.sort_by(|a, b| a.limit.cmp(&b.limit));
        Self::new(tiers)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn iter(&self) -> slice::Iter<'_, Tier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always `false`: a validated table has at least its unbounded tier.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// The smallest-limit tier, the only one allowed a fee.
    pub fn lowest(&self) -> &Tier {
        &self.tiers[0]
    }

    /// Resolve `amount` to its tier and charge.
    ///
    /// # Errors
    ///
    /// Returns `TierError::InvalidAmount` if `amount` is negative or the
    /// charge overflows.
    pub fn resolve(&self, amount: Decimal) -> Result<TierResult> {
        select(&self.tiers, amount)
    }

    /// Resolve a float amount, rejecting `NaN`, infinities and negatives.
    pub fn resolve_f64(&self, amount: f64) -> Result<TierResult> {
        self.resolve(amount_from_f64(amount)?)
    }

    /// Resolve a textual amount such as `"1000.01"`.
    pub fn resolve_str(&self, amount: &str) -> Result<TierResult> {
        self.resolve(parse_amount(amount)?)
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = TierError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

impl<'a> IntoIterator for &'a TierTable {
    type Item = &'a Tier;
    type IntoIter = slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check every table invariant: structure first, then pricing.
///
/// # Errors
///
/// Returns the first [`TableDefect`] found.
pub fn validate(tiers: &[Tier]) -> std::result::Result<(), TableDefect> {
    check_structure(tiers)?;
    check_pricing(tiers)
}

/// Invariants resolution depends on: non-empty, non-negative limits strictly
/// ascending, and a single unbounded tier in last position.
pub(crate) fn check_structure(tiers: &[Tier]) -> std::result::Result<(), TableDefect> {
    let last = tiers.len().checked_sub(1).ok_or(TableDefect::Empty)?;

    for (index, tier) in tiers.iter().enumerate() {
        match tier.limit {
            Limit::Unbounded if index != last => {
                return Err(TableDefect::SentinelNotLast { index })
            }
            Limit::Finite(limit) if limit < Decimal::ZERO => {
                return Err(TableDefect::NegativeLimit { index })
            }
            _ => {}
        }
        if index > 0 && tier.limit <= tiers[index - 1].limit {
            return Err(TableDefect::NotAscending { index });
        }
    }

    if !tiers[last].limit.is_unbounded() {
        return Err(TableDefect::MissingSentinel);
    }
    Ok(())
}

/// Rates strictly positive and non-increasing; a fee only on the first tier.
fn check_pricing(tiers: &[Tier]) -> std::result::Result<(), TableDefect> {
    for (index, tier) in tiers.iter().enumerate() {
        if tier.rate <= Decimal::ZERO {
            return Err(TableDefect::NonPositiveRate { index });
        }
        if index > 0 && tier.rate > tiers[index - 1].rate {
            return Err(TableDefect::RateIncreases { index });
        }
        if let Some(fee) = tier.fee {
            if fee < Decimal::ZERO {
                return Err(TableDefect::NegativeFee { index });
            }
            // A zero fee on an upper tier changes no charge.
            if index > 0 && !fee.is_zero() {
                return Err(TableDefect::FeeOnUpperTier { index });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn finite(limit: Decimal, rate: Decimal) -> Tier {
        Tier::new(Limit::Finite(limit), rate)
    }

    fn sentinel(rate: Decimal) -> Tier {
        Tier::new(Limit::Unbounded, rate)
    }

    fn defect(tiers: Vec<Tier>) -> TableDefect {
        match TierTable::new(tiers) {
            Err(TierError::MalformedTierTable(d)) => d,
            other => panic!("expected MalformedTierTable, got {other:?}"),
        }
    }

    fn sample() -> Vec<Tier> {
        vec![
            finite(dec!(1000), dec!(0.055)).with_fee(dec!(5.5)),
            finite(dec!(5000), dec!(0.054)),
            sentinel(dec!(0.053)),
        ]
    }

    #[test]
    fn test_valid_table() {
        let table = TierTable::new(sample()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.lowest().fee, Some(dec!(5.5)));
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn test_sentinel_only_table_is_valid() {
        let table = TierTable::new(vec![sentinel(dec!(0.05))]).unwrap();
        assert_eq!(table.resolve(dec!(123)).unwrap().index, 0);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(defect(vec![]), TableDefect::Empty);
    }

    #[test]
    fn test_missing_sentinel_rejected() {
        let tiers = vec![finite(dec!(1000), dec!(0.055)), finite(dec!(5000), dec!(0.054))];
        assert_eq!(defect(tiers), TableDefect::MissingSentinel);
    }

    #[test]
    fn test_duplicate_limit_rejected() {
        let tiers = vec![
            finite(dec!(1000), dec!(0.055)),
            finite(dec!(1000.0), dec!(0.054)),
            sentinel(dec!(0.053)),
        ];
        assert_eq!(defect(tiers), TableDefect::NotAscending { index: 1 });
    }

    #[test]
    fn test_unsorted_rejected() {
        let tiers = vec![
            finite(dec!(5000), dec!(0.055)),
            finite(dec!(1000), dec!(0.054)),
            sentinel(dec!(0.053)),
        ];
        assert_eq!(defect(tiers), TableDefect::NotAscending { index: 1 });
    }

    #[test]
    fn test_sentinel_not_last_rejected() {
        let tiers = vec![sentinel(dec!(0.055)), finite(dec!(1000), dec!(0.054))];
        assert_eq!(defect(tiers), TableDefect::SentinelNotLast { index: 0 });
    }

    #[test]
    fn test_two_sentinels_rejected() {
        let tiers = vec![sentinel(dec!(0.055)), sentinel(dec!(0.054))];
        assert_eq!(defect(tiers), TableDefect::SentinelNotLast { index: 0 });
    }

    #[test]
    fn test_negative_limit_rejected() {
        let tiers = vec![finite(dec!(-1), dec!(0.055)), sentinel(dec!(0.054))];
        assert_eq!(defect(tiers), TableDefect::NegativeLimit { index: 0 });
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let tiers = vec![finite(dec!(1000), dec!(0.055)), sentinel(dec!(0))];
        assert_eq!(defect(tiers), TableDefect::NonPositiveRate { index: 1 });
    }

    #[test]
    fn test_increasing_rate_rejected() {
        let tiers = vec![finite(dec!(1000), dec!(0.05)), sentinel(dec!(0.06))];
        assert_eq!(defect(tiers), TableDefect::RateIncreases { index: 1 });
    }

    #[test]
    fn test_equal_rates_allowed() {
        let tiers = vec![finite(dec!(1000000), dec!(0.0505)), sentinel(dec!(0.0505))];
        assert!(TierTable::new(tiers).is_ok());
    }

    #[test]
    fn test_negative_fee_rejected() {
        let tiers = vec![
            finite(dec!(1000), dec!(0.055)).with_fee(dec!(-1)),
            sentinel(dec!(0.054)),
        ];
        assert_eq!(defect(tiers), TableDefect::NegativeFee { index: 0 });
    }

    #[test]
    fn test_fee_on_upper_tier_rejected() {
        let tiers = vec![
            finite(dec!(1000), dec!(0.055)),
            sentinel(dec!(0.054)).with_fee(dec!(1)),
        ];
        assert_eq!(defect(tiers), TableDefect::FeeOnUpperTier { index: 1 });
    }

    #[test]
    fn test_zero_fee_on_upper_tier_allowed() {
        let tiers = vec![
            finite(dec!(1000), dec!(0.055)),
            sentinel(dec!(0.054)).with_fee(dec!(0)),
        ];
        assert!(TierTable::new(tiers).is_ok());
    }

    #[test]
    fn test_from_unsorted_sorts_before_validating() {
        let mut tiers = sample();
        tiers.reverse();
        let table = TierTable::from_unsorted(tiers).unwrap();
        assert_eq!(table.tiers(), sample().as_slice());
    }

    #[test]
    fn test_from_unsorted_still_rejects_duplicates() {
        let tiers = vec![
            sentinel(dec!(0.053)),
            finite(dec!(1000), dec!(0.055)),
            finite(dec!(1000), dec!(0.055)),
        ];
        assert_eq!(
            match TierTable::from_unsorted(tiers) {
                Err(TierError::MalformedTierTable(d)) => d,
                other => panic!("unexpected {other:?}"),
            },
            TableDefect::NotAscending { index: 1 }
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TierTable =
            serde_json::from_str(r#"[{"limit":1000,"rate":0.055,"fee":5.5},{"limit":"unbounded","rate":0.05}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);

        let err = serde_json::from_str::<TierTable>(r#"[{"limit":1000,"rate":0.055}]"#);
        assert!(err.is_err());
    }
}
