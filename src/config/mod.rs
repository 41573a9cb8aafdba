//! Program configuration
//!
//! Construction settings and YAML manifests declaring options up front.

pub mod manifest;

// Re-export main types
pub use manifest::*;
