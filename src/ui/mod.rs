//! UI module - contains UI rendering components

pub mod components;
mod symbol_mappings;

pub use symbol_mappings::SymbolMappingsEditor;
