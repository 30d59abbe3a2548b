//! Parsed header declarations
//!
//! [`SourceModel`] is the hand-off document from the header parser: a map of
//! header name to the interfaces, GUID constants and enums declared in it.
//! It is read from JSON or YAML.

use crate::error::ModelError;
use crate::iid::Iid;
use crate::interface::Interface;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Header name → declarations, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceModel {
    /// Declarations grouped by header
    #[serde(default)]
    pub headers: IndexMap<String, HeaderDecls>,
}

/// Declarations found in one header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderDecls {
    /// Interface-like types
    #[serde(default)]
    pub interfaces: Vec<Interface>,

    /// Standalone GUID constants (`DEFINE_GUID`)
    #[serde(default)]
    pub guids: Vec<GuidDecl>,

    /// Enumerations
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
}

/// Named GUID constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidDecl {
    /// Constant name, e.g. `IID_ID3D12Device`
    pub name: String,
    /// Value
    pub iid: Iid,
}

/// Enumeration declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    /// Type name
    pub name: String,
    /// Enumerators in declaration order
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// One enumerator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Symbolic name
    pub name: String,
    /// Numeric value
    pub value: i64,
}

/// Source document encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl SourceFormat {
    /// Pick format from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl SourceModel {
    /// Parse document text
    ///
    /// # Errors
    /// Returns the JSON or YAML error for malformed input
    pub fn parse(text: &str, format: SourceFormat) -> Result<Self, ModelError> {
        let model: Self = match format {
            SourceFormat::Json => serde_json::from_str(text)?,
            SourceFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(model)
    }

    /// Read and parse a document, choosing the format by extension
    ///
    /// # Errors
    /// Returns [`ModelError::UnsupportedFormat`] for unknown extensions,
    /// [`ModelError::Io`] for read failures, or the parse error
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = SourceFormat::from_extension(ext)
            .ok_or_else(|| ModelError::UnsupportedFormat(path.display().to_string()))?;

        let text = std::fs::read_to_string(path).map_err(|e| ModelError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), ?format, "loading source model");
        Self::parse(&text, format)
    }

    /// All enum declarations across headers
    pub fn enums(&self) -> impl Iterator<Item = &EnumDecl> {
        self.headers.values().flat_map(|h| h.enums.iter())
    }

    /// All standalone GUID constants across headers
    pub fn guids(&self) -> impl Iterator<Item = &GuidDecl> {
        self.headers.values().flat_map(|h| h.guids.iter())
    }

    /// Find enum by type name
    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YAML: &str = r#"
headers:
  d3d12.h:
    interfaces:
      - name: ID3D12Object
        iid: "{c4fec28f-7966-4e95-9f94-f431cb56c3b8}"
        inherits: [IUnknown]
      - name: ID3D12Device
        iid: "{189819f1-1db6-4b57-be54-1821339b85f7}"
        inherits: [ID3D12Object]
    guids:
      - name: IID_ID3D12Device
        iid: "{189819f1-1db6-4b57-be54-1821339b85f7}"
    enums:
      - name: D3D12_COMMAND_LIST_TYPE
        values:
          - { name: D3D12_COMMAND_LIST_TYPE_DIRECT, value: 0 }
          - { name: D3D12_COMMAND_LIST_TYPE_BUNDLE, value: 1 }
"#;

    #[test]
    fn parse_yaml_document() {
        let model = SourceModel::parse(YAML, SourceFormat::Yaml).unwrap();
        let header = &model.headers["d3d12.h"];
        assert_eq!(header.interfaces.len(), 2);
        assert_eq!(header.interfaces[1].parents.as_slice(), ["ID3D12Object".to_string()]);
        assert_eq!(model.guids().count(), 1);
        assert_eq!(model.find_enum("D3D12_COMMAND_LIST_TYPE").unwrap().values.len(), 2);
    }

    #[test]
    fn json_and_yaml_agree() {
        let model = SourceModel::parse(YAML, SourceFormat::Yaml).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back = SourceModel::parse(&json, SourceFormat::Json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn bad_iid_is_a_parse_error() {
        let text = r#"{ "headers": { "x.h": { "interfaces": [ { "name": "X", "iid": "nope" } ] } } }"#;
        assert!(matches!(
            SourceModel::parse(text, SourceFormat::Json),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_extension("YML"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_extension("json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_extension("h"), None);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let result = SourceModel::load("model.txt");
        assert!(matches!(result, Err(ModelError::UnsupportedFormat(_))));
    }
}
