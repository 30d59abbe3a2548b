//! Error types for family resolution
//!
//! Provides error handling for:
//! - Generation-time graph defects ([`MalformedGraph`])
//! - Configuration loading ([`ConfigError`])

use std::path::PathBuf;
use wrapgen_model::Iid;

/// Defects in the interface graph found before any dispatch is generated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGraph {
    /// The parent relation is not acyclic
    #[error("inheritance cycle through '{name}'")]
    Cycle { name: String },

    /// A version implied by the leaf's name is not declared
    #[error("family '{base}' (leaf '{leaf}') is missing version '{missing}'")]
    MissingVersion {
        base: String,
        leaf: String,
        missing: String,
    },

    /// A family member has no interface id
    #[error("interface '{name}' has no interface id")]
    MissingIid { name: String },

    /// Numeric suffix is not a canonical positive version
    #[error("interface '{name}' has an invalid version suffix: {reason}")]
    InvalidVersion { name: String, reason: String },

    /// Two leaves resolve to the same base name
    #[error("leaves '{first}' and '{second}' both resolve to family '{base}'")]
    OverlappingFamilies {
        base: String,
        first: String,
        second: String,
    },

    /// One interface id belongs to two family members
    #[error("interface id {iid} used by both '{first}' and '{second}'")]
    DuplicateIid {
        iid: Iid,
        first: String,
        second: String,
    },
}

/// Errors while loading a generation config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during config read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
