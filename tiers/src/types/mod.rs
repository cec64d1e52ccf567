mod limit;
mod result;
mod tier;

pub use limit::{Limit, UNBOUNDED};
pub use result::TierResult;
pub use tier::Tier;
