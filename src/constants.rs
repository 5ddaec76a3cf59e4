//! Application constants and configuration

pub const APP_NAME: &str = "Symbol Mapper";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings-store key holding the JSON array of symbol mappings
pub const SYMBOL_MAPPINGS_KEY: &str = "symbol_mappings";

/// Limits are counted in chars of the trimmed input
pub const MAX_PHRASE_LEN: usize = 50;
pub const MAX_SYMBOL_LEN: usize = 10;
