//! Generation configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How to treat a version implied by naming but absent from the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Fail generation with [`crate::MalformedGraph::MissingVersion`]
    #[default]
    Reject,

    /// Drop the missing member from the chain and warn
    Skip,
}

/// Family-resolution settings
///
/// Loaded from TOML; every field is optional:
///
/// ```toml
/// root_interface = "IUnknown"
/// gap_policy = "skip"
/// constructor_prefix = "Wrap"
/// excluded = ["ID3D12Debug"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Root interface every family ultimately inherits; never wrapped itself
    pub root_interface: String,
    /// Gap handling during chain validation
    pub gap_policy: GapPolicy,
    /// Prefix of per-family constructor names
    pub constructor_prefix: String,
    /// Interface names left out of generation
    pub excluded: Vec<String>,
}

impl GenerationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With gap policy
    #[inline]
    #[must_use]
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    /// With root interface name
    #[inline]
    #[must_use]
    pub fn with_root_interface(mut self, name: impl Into<String>) -> Self {
        self.root_interface = name.into();
        self
    }

    /// With an additional excluded interface
    #[must_use]
    pub fn with_excluded(mut self, name: impl Into<String>) -> Self {
        self.excluded.push(name.into());
        self
    }

    /// Whether `name` takes part in generation at all
    #[must_use]
    pub fn participates(&self, name: &str) -> bool {
        name != self.root_interface && !self.excluded.iter().any(|e| e == name)
    }

    /// Constructor name for a family base, e.g. `WrapID3D12Device`
    #[must_use]
    pub fn constructor_name(&self, base: &str) -> String {
        format!("{}{base}", self.constructor_prefix)
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] for malformed input
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Toml`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            root_interface: "IUnknown".to_string(),
            gap_policy: GapPolicy::Reject,
            constructor_prefix: "Wrap".to_string(),
            excluded: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.root_interface, "IUnknown");
        assert_eq!(config.gap_policy, GapPolicy::Reject);
        assert_eq!(config.constructor_name("Device"), "WrapDevice");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GenerationConfig::from_toml_str(
            r#"
            gap_policy = "skip"
            excluded = ["ID3D12Debug"]
            "#,
        )
        .unwrap();

        assert_eq!(config.gap_policy, GapPolicy::Skip);
        assert_eq!(config.root_interface, "IUnknown");
        assert!(!config.participates("ID3D12Debug"));
        assert!(!config.participates("IUnknown"));
        assert!(config.participates("ID3D12Device"));
    }

    #[test]
    fn bad_toml() {
        let result = GenerationConfig::from_toml_str("gap_policy = \"sometimes\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
