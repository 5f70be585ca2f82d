// Package manifest (package.json) bin lookup

use serde::Deserialize;
use std::collections::HashMap;

/// The subset of package.json the resolver reads
#[derive(Debug, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bin: Option<BinField>,
}

/// `bin` is either a single script or a map of command name to script
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BinField {
    Single(String),
    Map(HashMap<String, String>),
    /// Anything else npm would reject
    Other(serde_json::Value),
}

impl PackageManifest {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Script path (relative to the package directory) for command `name`
    ///
    /// A string `bin` only counts when the package itself is named `name`.
    pub fn bin_for(&self, name: &str) -> Option<&str> {
        let script = match self.bin.as_ref()? {
            BinField::Single(script) if self.name.as_deref() == Some(name) => Some(script.as_str()),
            BinField::Single(_) => None,
            BinField::Map(entries) => entries.get(name).map(String::as_str),
            BinField::Other(_) => None,
        };
        script.filter(|script| !script.is_empty())
    }
}
