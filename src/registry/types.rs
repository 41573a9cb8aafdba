//! Core option types
//!
//! This module defines the data structures describing one declared option
//! and the values the parser coerces its arguments into.

use std::fmt;
use std::sync::Arc;

/// A coerced option value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A user supplied conversion from the raw argument text to a [`Value`]
#[derive(Clone)]
pub struct Coercion(Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>);

impl Coercion {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        Coercion(Arc::new(f))
    }

    pub fn apply(&self, raw: &str) -> Result<Value, String> {
        (self.0)(raw)
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Coercion(..)")
    }
}

/// How the raw argument of an option is interpreted
#[derive(Debug, Clone, Default)]
pub enum OptionType {
    #[default]
    String,
    Number,
    /// A flag taking no value
    Boolean,
    Custom(Coercion),
}

impl OptionType {
    /// Build a custom coercion type from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        OptionType::Custom(Coercion::new(f))
    }

    /// Look up a type by the name used in manifests
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" | "str" => Some(OptionType::String),
            "number" | "num" => Some(OptionType::Number),
            "boolean" | "bool" => Some(OptionType::Boolean),
            _ => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, OptionType::Boolean)
    }
}

/// A declared option
#[derive(Debug, Clone)]
pub struct OptionDef {
    /// Long name, matched as `--<name>`
    pub name: String,

    /// Short alias without leading dashes
    pub shorthand: Option<String>,

    /// Description shown in help
    pub description: String,

    /// Display string, `-p, --port` or `--port`
    pub usage: String,

    /// Value type
    pub ty: OptionType,
}

impl OptionDef {
    /// Create a definition, stripping leading dashes from name and shorthand
    pub fn new(name: &str, shorthand: &str, description: &str, ty: OptionType) -> Self {
        let name = name.trim_start_matches('-').to_string();
        let shorthand = shorthand.trim_start_matches('-');
        let usage = if shorthand.is_empty() {
            format!("--{}", name)
        } else {
            format!("-{}, --{}", shorthand, name)
        };

        OptionDef {
            name,
            shorthand: (!shorthand.is_empty()).then(|| shorthand.to_string()),
            description: description.to_string(),
            usage,
            ty,
        }
    }
}
