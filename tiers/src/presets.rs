//! Built-in rate sheets.
//!
//! All three share one shape: seven finite bands plus the unbounded catch-all,
//! with the flat fee on the lowest band only.

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TierError};
use crate::table::TierTable;
use crate::types::{Limit, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Standard,
    Partner,
    Channel,
}

const STANDARD: &[Tier] = &[
    Tier { limit: Limit::Finite(dec!(1000)), rate: dec!(0.055), fee: Some(dec!(5.5)) },
    Tier { limit: Limit::Finite(dec!(5000)), rate: dec!(0.054), fee: None },
    Tier { limit: Limit::Finite(dec!(10000)), rate: dec!(0.053), fee: None },
    Tier { limit: Limit::Finite(dec!(30000)), rate: dec!(0.052), fee: None },
    Tier { limit: Limit::Finite(dec!(50000)), rate: dec!(0.0515), fee: None },
    Tier { limit: Limit::Finite(dec!(100000)), rate: dec!(0.051), fee: None },
    Tier { limit: Limit::Finite(dec!(1000000)), rate: dec!(0.0505), fee: None },
    Tier { limit: Limit::Unbounded, rate: dec!(0.0505), fee: None },
];

const PARTNER: &[Tier] = &[
    Tier { limit: Limit::Finite(dec!(1000)), rate: dec!(0.05), fee: Some(dec!(5)) },
    Tier { limit: Limit::Finite(dec!(5000)), rate: dec!(0.049), fee: None },
    Tier { limit: Limit::Finite(dec!(10000)), rate: dec!(0.048), fee: None },
    Tier { limit: Limit::Finite(dec!(30000)), rate: dec!(0.047), fee: None },
    Tier { limit: Limit::Finite(dec!(50000)), rate: dec!(0.0465), fee: None },
    Tier { limit: Limit::Finite(dec!(100000)), rate: dec!(0.046), fee: None },
    Tier { limit: Limit::Finite(dec!(1000000)), rate: dec!(0.0455), fee: None },
    Tier { limit: Limit::Unbounded, rate: dec!(0.0455), fee: None },
];

const CHANNEL: &[Tier] = &[
    Tier { limit: Limit::Finite(dec!(1000)), rate: dec!(0.06), fee: Some(dec!(6)) },
    Tier { limit: Limit::Finite(dec!(5000)), rate: dec!(0.059), fee: None },
    Tier { limit: Limit::Finite(dec!(10000)), rate: dec!(0.058), fee: None },
    Tier { limit: Limit::Finite(dec!(30000)), rate: dec!(0.057), fee: None },
    Tier { limit: Limit::Finite(dec!(50000)), rate: dec!(0.0565), fee: None },
    Tier { limit: Limit::Finite(dec!(100000)), rate: dec!(0.056), fee: None },
    Tier { limit: Limit::Finite(dec!(1000000)), rate: dec!(0.0555), fee: None },
    Tier { limit: Limit::Unbounded, rate: dec!(0.0555), fee: None },
];

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Standard, Preset::Partner, Preset::Channel];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Partner => "partner",
            Preset::Channel => "channel",
        }
    }

    /// Raw rows of this rate sheet.
    pub fn tiers(self) -> &'static [Tier] {
        match self {
            Preset::Standard => STANDARD,
            Preset::Partner => PARTNER,
            Preset::Channel => CHANNEL,
        }
    }

    /// Validated table for this rate sheet.
    pub fn table(self) -> Result<TierTable> {
        TierTable::new(self.tiers().to_vec())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TierError::UnknownPreset(s.to_string()))
    }
}
