use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::table::TierTable;
use crate::types::Tier;

/// Parse a JSON tier table: an array of `{ "limit", "rate", "fee"? }` objects.
///
/// With `sort` set, rows are ordered by limit before validation; otherwise an
/// out-of-order file is rejected.
///
/// # Errors
///
/// * `TierError::Json` if the text is not a well-formed table.
/// * `TierError::MalformedTierTable` if the rows break a table invariant.
pub fn parse_table(text: &str, sort: bool) -> Result<TierTable> {
    let tiers: Vec<Tier> = serde_json::from_str(text)?;
    if sort {
        TierTable::from_unsorted(tiers)
    } else {
        TierTable::new(tiers)
    }
}

/// Read and validate a JSON tier table file.
pub fn load_table(path: impl AsRef<Path>, sort: bool) -> Result<TierTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let table = parse_table(&text, sort)?;
    info!(path = %path.display(), tiers = table.len(), "tier table loaded");
    Ok(table)
}
