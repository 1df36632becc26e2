// crates/textlocale-core/src/runtime/mod.rs
// ============================================================================
// Module: TextLocale Runtime
// Description: Dictionary cache, key resolver, and language detectors.
// Purpose: Host the stateful parts of the engine.
// Dependencies: tokio, tracing, sys-locale, url
// ============================================================================

//! ## Overview
//! - [`store`] owns the (domain, language) cache and the load discipline.
//! - [`resolver`] implements tag narrowing and the fallback chain.
//! - [`detect`] provides [`crate::LanguageDetector`] implementations.

pub mod detect;
pub mod resolver;
pub mod store;
