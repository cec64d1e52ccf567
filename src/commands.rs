//! Subcommand bodies, generic over their input and output streams.

use std::io::{BufRead, Write};
use std::path::Path;

use tiers::{CalcConfig, TableSource, TierError, TierTable};
use tracing::{error, info, warn};

use crate::cli::SourceArgs;
use crate::error::CliError;
use crate::output;

/// Config named by `--table` / `--preset`, or `None` when neither was given.
pub fn config_from_flags(source: &SourceArgs) -> Result<Option<CalcConfig>, CliError> {
    if let Some(path) = &source.table {
        return Ok(Some(CalcConfig {
            source: TableSource::File {
                path: path.clone(),
                sort: source.sort,
            },
        }));
    }
    if let Some(name) = &source.preset {
        return Ok(Some(CalcConfig {
            source: TableSource::Preset(name.parse()?),
        }));
    }
    Ok(None)
}

/// Flags win over `RATECALC_TABLE` / `RATECALC_PRESET` (a `.env` file is
/// loaded first if present).
pub fn resolve_config(source: &SourceArgs) -> Result<CalcConfig, CliError> {
    if let Some(config) = config_from_flags(source)? {
        return Ok(config);
    }
    let _ = dotenvy::dotenv(); // load .env if present
    Ok(CalcConfig::from_env()?)
}

pub fn load_active_table(source: &SourceArgs) -> Result<TierTable, CliError> {
    let config = resolve_config(source)?;
    Ok(config.load_table()?)
}

/// Price every amount in `amounts`, or every non-blank line of `input` when
/// `amounts` is empty. Rejected amounts are logged and skipped.
///
/// Returns `Ok(false)` if any amount was rejected.
pub fn quote<R: BufRead, W: Write>(
    table: &TierTable,
    amounts: &[String],
    json: bool,
    input: R,
    writer: &mut W,
) -> Result<bool, CliError> {
    let mut buf = String::with_capacity(256);
    let mut all_ok = true;

    // Ok(false) when the amount is rejected.
    let mut price = |text: &str| -> Result<bool, CliError> {
        match table.resolve_str(text) {
            Ok(result) => {
                output::write_result(&result, json, &mut buf, &mut *writer)?;
                Ok(true)
            }
            Err(TierError::InvalidAmount(reason)) => {
                warn!(amount = text, %reason, "amount rejected");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    };

    if !amounts.is_empty() {
        for amount in amounts {
            all_ok &= price(amount.as_str())?;
        }
        return Ok(all_ok);
    }

    info!("reading amounts from stdin");
    for (line_no, line) in input.split(b'\n').enumerate() {
        let line = line.map_err(CliError::Input)?;
        match std::str::from_utf8(&line) {
            Ok(text) if text.trim().is_empty() => {}
            Ok(text) => all_ok &= price(text)?,
            Err(e) => {
                warn!(line = line_no + 1, reason = %e, "amount rejected");
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

/// Validate a table file. Returns `Ok(false)` if the table breaks an invariant.
pub fn check(path: &Path, sort: bool) -> Result<bool, CliError> {
    match tiers::load_table(path, sort) {
        Ok(table) => {
            info!(path = %path.display(), tiers = table.len(), "tier table is valid");
            Ok(true)
        }
        Err(e @ TierError::MalformedTierTable(_)) => {
            error!(path = %path.display(), error = %e, "tier table rejected");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
