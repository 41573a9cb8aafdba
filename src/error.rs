//! Error types for argfeed

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for argfeed operations
pub type Result<T> = std::result::Result<T, ArgfeedError>;

/// Main error type for argfeed
#[derive(Error, Debug)]
pub enum ArgfeedError {
    /// Option declaration errors
    #[error("Declaration error: {0}")]
    Declaration(#[from] DeclarationError),

    /// Command line rejected by the underlying parser
    #[error("{0}")]
    Parse(#[from] clap::Error),

    /// Input collection errors
    #[error("Input error: {0}")]
    Collect(#[from] CollectError),

    /// I/O errors (writing help or version output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors in how options were declared
#[derive(Error, Debug)]
pub enum DeclarationError {
    #[error("Option name cannot be empty")]
    EmptyName,

    #[error("Option '{name}' has unknown type '{kind}'")]
    UnknownType { name: String, kind: String },

    #[error("Failed to load manifest '{path}': {error}")]
    Manifest { path: PathBuf, error: String },
}

/// Errors raised while reading standard input or file arguments.
///
/// Cloneable so one failed read can be handed to every waiting callback.
#[derive(Error, Debug, Clone)]
pub enum CollectError {
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] Arc<io::Error>),

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
}

impl CollectError {
    pub fn stdin(error: io::Error) -> Self {
        CollectError::Stdin(Arc::new(error))
    }

    pub fn read_file(path: impl Into<PathBuf>, error: io::Error) -> Self {
        CollectError::ReadFile {
            path: path.into(),
            source: Arc::new(error),
        }
    }

    /// Kind of the underlying I/O failure
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            CollectError::Stdin(e) => e.kind(),
            CollectError::ReadFile { source, .. } => source.kind(),
        }
    }
}

/// Specialized result type for declaration checks
pub type DeclarationResult<T> = std::result::Result<T, DeclarationError>;

/// Specialized result type for input collection
pub type CollectResult<T> = std::result::Result<T, CollectError>;
