//! Option registry
//!
//! Keeps the declared options in insertion order along with the
//! display-only shorthand table.

pub mod decl;
pub mod types;

pub use decl::*;
pub use types::*;

use crate::error::{DeclarationError, DeclarationResult};
use indexmap::IndexMap;
use tracing::warn;

/// Ordered set of declared options
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: Vec<OptionDef>,
    shorthands: IndexMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option. Redefining a name replaces the earlier definition in place.
    pub fn insert(&mut self, def: OptionDef) {
        match self.options.iter_mut().find(|o| o.name == def.name) {
            Some(existing) => {
                warn!(option = %def.name, "option redefined, last definition wins");
                *existing = def;
            }
            None => self.options.push(def),
        }
    }

    /// Add an entry to the display-only shorthand table
    pub fn add_shorthand(&mut self, key: String, value: String) {
        self.shorthands.insert(key, value);
    }

    pub fn get(&self, name: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The display-only shorthand table
    pub fn shorthands(&self) -> &IndexMap<String, String> {
        &self.shorthands
    }

    /// Map each option name to its type
    pub fn type_map(&self) -> IndexMap<String, OptionType> {
        self.options
            .iter()
            .map(|o| (o.name.clone(), o.ty.clone()))
            .collect()
    }

    /// Map each shorthand flag to the long flag it stands for (`p` -> `--port`)
    pub fn shorthand_map(&self) -> IndexMap<String, String> {
        self.options
            .iter()
            .filter_map(|o| {
                o.shorthand
                    .as_ref()
                    .map(|s| (s.clone(), format!("--{}", o.name)))
            })
            .collect()
    }

    /// Check that every option can be handed to the parser
    pub fn validate(&self) -> DeclarationResult<()> {
        if self.options.iter().any(|o| o.name.is_empty()) {
            return Err(DeclarationError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry.insert(OptionDef::new("port", "p", "Port", OptionType::Number));
        registry.insert(OptionDef::new("pid", "", "PID file", OptionType::String));
        registry.insert(OptionDef::new("debug", "d", "Debug", OptionType::Boolean));
        registry
    }

    #[test]
    fn test_insertion_order() {
        let names: Vec<_> = sample().iter().map(|o| o.name.clone()).collect();
        assert_eq!(names, vec!["port", "pid", "debug"]);
    }

    #[test]
    fn test_redefinition_last_wins_in_place() {
        let mut registry = sample();
        registry.insert(OptionDef::new("port", "P", "Port number", OptionType::String));

        assert_eq!(registry.len(), 3);
        let first = registry.iter().next().unwrap();
        assert_eq!(first.name, "port");
        assert_eq!(first.usage, "-P, --port");
        assert!(matches!(first.ty, OptionType::String));
    }

    #[test]
    fn test_shorthand_map() {
        let map = sample().shorthand_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("p"), Some(&"--port".to_string()));
        assert_eq!(map.get("d"), Some(&"--debug".to_string()));
    }

    #[test]
    fn test_type_map() {
        let map = sample().type_map();
        assert!(matches!(map.get("port"), Some(OptionType::Number)));
        assert!(matches!(map.get("debug"), Some(OptionType::Boolean)));
    }

    #[test]
    fn test_display_shorthands_replace_in_place() {
        let mut registry = Registry::new();
        registry.add_shorthand("dev".to_string(), "--debug --port 8080".to_string());
        registry.add_shorthand("prod".to_string(), "--port 80".to_string());
        registry.add_shorthand("dev".to_string(), "--debug".to_string());

        let keys: Vec<_> = registry.shorthands().keys().cloned().collect();
        assert_eq!(keys, vec!["dev", "prod"]);
        assert_eq!(registry.shorthands()["dev"], "--debug");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut registry = sample();
        assert!(registry.validate().is_ok());
        registry.insert(OptionDef::new("--", "", "", OptionType::String));
        assert!(matches!(registry.validate(), Err(DeclarationError::EmptyName)));
    }
}
