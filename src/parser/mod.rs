//! Command line parsing and help generation
//!
//! The registry is translated into a clap command for parsing; help text
//! is rendered by this crate so its layout stays stable.

pub mod adapter;
pub mod help;

// Re-export main types
pub use adapter::*;
pub use help::*;
