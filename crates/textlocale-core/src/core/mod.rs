// crates/textlocale-core/src/core/mod.rs
// ============================================================================
// Module: TextLocale Core Types
// Description: Identifiers and dictionary values shared by every crate.
// Purpose: Group the plain data model behind a single module path.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Plain data types: [`identifiers`] for language tags and domains, and
//! [`dictionary`] for the flat key/value maps loaded per pair.

pub mod dictionary;
pub mod identifiers;
