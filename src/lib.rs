//! Field discovery and CRM mapping for voice-call integrations.
//!
//! Call payloads are parsed, their fields catalogued, and catalog fields mapped
//! onto a CRM target schema. The integration being edited is a versioned
//! document driven by a reducer.

pub mod catalog;
pub mod config;
pub mod discover;
pub mod error;
pub mod mapping;
pub mod parse;
pub mod schema;
pub mod template;
pub mod wasm;
