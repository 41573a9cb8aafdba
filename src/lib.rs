//! argfeed - chainable command line options with input helpers
//!
//! Declare options with a fluent builder, parse the command line through
//! clap, and read input from standard input or from the files named on the
//! command line.

// Public modules
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod events;
pub mod parser;
pub mod program;
pub mod registry;

// Re-export commonly used types
pub use collect::{Collected, Source};
pub use error::{ArgfeedError, CollectError, Result};
pub use parser::ParsedResult;
pub use program::{Outcome, Program};
pub use registry::{OptionType, Value};

/// Current version of argfeed
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
