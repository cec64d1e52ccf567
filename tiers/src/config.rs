use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::loader::load_table;
use crate::presets::Preset;
use crate::table::TierTable;

/// Environment variable naming a built-in preset.
pub const PRESET_ENV: &str = "RATECALC_PRESET";
/// Environment variable naming a JSON table file; wins over `RATECALC_PRESET`.
pub const TABLE_ENV: &str = "RATECALC_TABLE";

/// Where the process's single tier table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Preset(Preset),
    File { path: PathBuf, sort: bool },
}

impl Default for TableSource {
    fn default() -> Self {
        TableSource::Preset(Preset::default())
    }
}

/// Configuration for the calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalcConfig {
    pub source: TableSource,
}

impl CalcConfig {
    /// Build from raw preset / table values (typically environment variables).
    ///
    /// A table path takes precedence over a preset name; with neither the
    /// default preset is used.
    pub fn from_vars(preset: Option<&str>, table: Option<&str>) -> Result<Self> {
        let source = match (table.filter(|t| !t.trim().is_empty()), preset) {
            (Some(path), _) => TableSource::File {
                path: PathBuf::from(path.trim()),
                sort: false,
            },
            (None, Some(name)) if !name.trim().is_empty() => TableSource::Preset(name.parse()?),
            (None, _) => TableSource::default(),
        };
        Ok(Self { source })
    }

    /// Build from `RATECALC_TABLE` / `RATECALC_PRESET`.
    pub fn from_env() -> Result<Self> {
        let preset = std::env::var(PRESET_ENV).ok();
        let table = std::env::var(TABLE_ENV).ok();
        Self::from_vars(preset.as_deref(), table.as_deref())
    }

    /// Load and validate the configured table.
    pub fn load_table(&self) -> Result<TierTable> {
        match &self.source {
            TableSource::Preset(preset) => {
                let table = preset.table()?;
                info!(preset = %preset, tiers = table.len(), "using preset tier table");
                Ok(table)
            }
            TableSource::File { path, sort } => load_table(path, *sort),
        }
    }
}
