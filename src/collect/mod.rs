//! Input collection
//!
//! After parsing, input comes either from standard input (no positional
//! arguments) or from the files named by the positional arguments.

pub mod files;
pub mod stdin;

pub use files::read_files;
pub use stdin::read_stream;

use crate::error::CollectResult;

/// Where collected input came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    /// The files read, in order
    Files(Vec<String>),
}

/// Input gathered by a collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    pub contents: String,
    pub source: Source,
}

impl Collected {
    /// Names of the files read, empty for standard input
    pub fn files(&self) -> &[String] {
        match &self.source {
            Source::Stdin => &[],
            Source::Files(files) => files,
        }
    }
}

/// Completion callback of a collector
pub type Done = Box<dyn FnOnce(CollectResult<Collected>)>;

/// A collector request made before parsing, replayed once parsing completes
pub(crate) enum Pending {
    Stdin { force: bool, done: Done },
    Files { done: Done },
}
