//! Program settings and YAML option manifests

use crate::error::{ArgfeedError, DeclarationError};
use crate::registry::{OptionDef, OptionType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Construction settings for a program
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Program name used in usage output (defaults to the base name of the binary)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

/// Options declared in a YAML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    /// Program settings
    #[serde(flatten)]
    pub settings: Settings,

    /// Version printed by `--version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Options, in help order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ManifestOption>,

    /// Display-only shorthand table
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub shorthands: IndexMap<String, String>,
}

/// One option entry of a manifest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestOption {
    pub name: String,

    /// Short flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Description for help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value type (string, number, boolean)
    #[serde(rename = "type", default = "default_option_type")]
    pub option_type: String,
}

fn default_option_type() -> String {
    "string".to_string()
}

impl ManifestOption {
    /// Convert into an option definition
    pub fn to_def(&self) -> Result<OptionDef, DeclarationError> {
        let ty = OptionType::from_name(&self.option_type).ok_or_else(|| {
            DeclarationError::UnknownType {
                name: self.name.clone(),
                kind: self.option_type.clone(),
            }
        })?;

        Ok(OptionDef::new(
            &self.name,
            self.short.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            ty,
        ))
    }
}

/// Parse a manifest from a YAML string
pub fn parse_manifest(yaml: &str) -> Result<Manifest, ArgfeedError> {
    let manifest: Manifest = serde_yaml::from_str(yaml)?;
    Ok(manifest)
}

/// Parse a manifest file
pub fn parse_manifest_file(path: &Path) -> Result<Manifest, ArgfeedError> {
    let contents = fs::read_to_string(path).map_err(|e| DeclarationError::Manifest {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    serde_yaml::from_str(&contents).map_err(|e| {
        DeclarationError::Manifest {
            path: path.to_path_buf(),
            error: e.to_string(),
        }
        .into()
    })
}
