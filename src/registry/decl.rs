//! Argument forms accepted by `Program::option`
//!
//! An option can be declared with any combination of shorthand, description
//! and type. Each accepted combination is a tuple implementing [`IntoDecl`]:
//!
//! ```
//! use argfeed::{OptionType, Program};
//!
//! let program = Program::new(vec!["serve".to_string()])
//!     .option("port", ("-p", "Port to listen on", OptionType::Number))
//!     .option("pid", ("Path to the generated PID file", OptionType::String))
//!     .option("host", ("-H", "Host to bind"))
//!     .option("quiet", "Suppress output");
//! assert_eq!(program.registry().len(), 6);
//! ```

use crate::registry::OptionType;

/// The optional parts of an option declaration
#[derive(Debug, Clone, Default)]
pub struct Decl {
    pub shorthand: String,
    pub description: String,
    pub ty: OptionType,
}

/// Conversion into a [`Decl`]
pub trait IntoDecl {
    fn into_decl(self) -> Decl;
}

impl IntoDecl for Decl {
    fn into_decl(self) -> Decl {
        self
    }
}

/// Description only
impl IntoDecl for &str {
    fn into_decl(self) -> Decl {
        Decl {
            description: self.to_string(),
            ..Decl::default()
        }
    }
}

/// Type only
impl IntoDecl for OptionType {
    fn into_decl(self) -> Decl {
        Decl {
            ty: self,
            ..Decl::default()
        }
    }
}

/// Shorthand and description
impl IntoDecl for (&str, &str) {
    fn into_decl(self) -> Decl {
        Decl {
            shorthand: self.0.to_string(),
            description: self.1.to_string(),
            ty: OptionType::String,
        }
    }
}

/// Description and type
impl IntoDecl for (&str, OptionType) {
    fn into_decl(self) -> Decl {
        Decl {
            shorthand: String::new(),
            description: self.0.to_string(),
            ty: self.1,
        }
    }
}

/// Shorthand, description and type
impl IntoDecl for (&str, &str, OptionType) {
    fn into_decl(self) -> Decl {
        Decl {
            shorthand: self.0.to_string(),
            description: self.1.to_string(),
            ty: self.2,
        }
    }
}
