//! Option program
//!
//! Ties the registry, parser, events and input collectors together.

pub mod app;

// Re-export main types
pub use app::*;
