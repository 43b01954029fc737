//! Diagnostics for the structured store engine
//!
//! Soft conditions (absent schema, malformed `properties`) are absorbed
//! locally with a diagnostic line instead of an error. Output is structured
//! JSON, one line per event, written synchronously with deterministic key
//! ordering.

mod logger;

pub use logger::{info, warn, LogLevel};
