//! Component descriptor format.
//!
//! A component is declared by a `*.component.yaml` document shipped inside
//! a dependency artifact (directly in a directory artifact, or as an entry
//! of a zip/jar container).

use componentgen_core::error::{GenerateError, Result};
use serde::Deserialize;

/// File-name suffix marking a component descriptor.
pub const DESCRIPTOR_SUFFIX: &str = ".component.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentDescriptor {
    /// Display name; also the transformer input when no explicit path is
    /// declared.
    pub name: String,
    /// Component group; falls back to the run's default group.
    #[serde(default)]
    pub group: Option<String>,
    /// Explicit output path segment, bypassing the name transformer.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub widgets: Vec<WidgetDecl>,
    /// In-place editor kind for the touch UI.
    #[serde(default)]
    pub inplace_editor: Option<String>,
}

/// One declared dialog field.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetDecl {
    pub field: String,
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl ComponentDescriptor {
    /// Parse and validate one descriptor document. `origin` names the file
    /// or archive entry, for error messages only.
    pub fn parse(origin: &str, bytes: &[u8]) -> Result<Self> {
        let descriptor: ComponentDescriptor = serde_yaml::from_slice(bytes).map_err(|e| {
            GenerateError::Generation(format!("malformed component descriptor {}: {}", origin, e))
        })?;
        if descriptor.name.trim().is_empty() {
            return Err(GenerateError::Generation(format!(
                "component descriptor {} has no name",
                origin
            )));
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_descriptor() {
        let yaml = b"name: Image Banner\ngroup: media\nwidgets:\n  - field: title\n    kind: textfield\n    label: Title\n    required: true\n  - field: image\n    kind: pathfield\ninplace_editor: image\n";
        let d = ComponentDescriptor::parse("lib/banner.component.yaml", yaml).unwrap();
        assert_eq!(d.name, "Image Banner");
        assert_eq!(d.group.as_deref(), Some("media"));
        assert_eq!(d.widgets.len(), 2);
        assert!(d.widgets[0].required);
        assert_eq!(d.inplace_editor.as_deref(), Some("image"));
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        let err = ComponentDescriptor::parse("x.component.yaml", b"name: \"\"\n").unwrap_err();
        assert!(matches!(err, GenerateError::Generation(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        let err = ComponentDescriptor::parse("x.component.yaml", b"{not yaml").unwrap_err();
        assert!(err.to_string().contains("x.component.yaml"));
    }
}
