//! Command line tool
//!
//! The `argfeed` binary, built on [`crate::Program`].

pub mod app;

// Re-export main types
pub use app::*;
