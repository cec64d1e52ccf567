pub mod amount;
pub mod config;
pub mod error;
pub mod loader;
pub mod presets;
pub mod resolve;
pub mod table;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Config
pub use config::{CalcConfig, TableSource};
pub use error::{Result, TableDefect, TierError};

// Core types
pub use types::{Limit, Tier, TierResult};

// Tables + resolution
pub use presets::Preset;
pub use resolve::resolve;
pub use table::{validate, TierTable};

// Loading + amount parsing
pub use amount::{amount_from_f64, parse_amount};
pub use loader::{load_table, parse_table};
