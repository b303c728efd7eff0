//! Build configuration schema.
//!
//! Deserialized from `componentgen.yaml`; see [`super::loader`] for file
//! resolution and environment overrides.

use serde::Deserialize;
use std::path::PathBuf;

/// Project identity and build layout. Name and version become the archive
/// file stem, so both must be plain path segments.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub version: String,
    /// Build output directory, relative paths resolved against the
    /// configuration file's directory.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

/// Generation parameters forwarded into the Generation Request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Registered name of the component-name transformer.
    pub transformer: String,
    /// Repository path base under which components are placed.
    pub component_path_base: String,
    /// Path segment between the base and each component node.
    pub component_path_suffix: String,
    /// Group assigned to components that do not declare one.
    pub default_component_group: String,
    pub generate_classic_ui: bool,
    pub generate_touch_ui: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            transformer: "hyphenated".to_string(),
            component_path_base: "apps".to_string(),
            component_path_suffix: "components".to_string(),
            default_component_group: "General".to_string(),
            generate_classic_ui: true,
            generate_touch_ui: true,
        }
    }
}

/// Dependency artifact inputs for the run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Artifact paths (directories or zip/jar containers) added to the
    /// isolated scope. Relative paths resolved against the configuration
    /// file's directory.
    pub artifacts: Vec<PathBuf>,
    /// Artifact names excluded from the scope before it is constructed.
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub project: ProjectConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub dependencies: DependencyConfig,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

/// A name usable as a single path segment in archive and component paths.
pub fn is_plain_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segment_accepts_typical_identifiers() {
        assert!(is_plain_segment("widgets"));
        assert!(is_plain_segment("1.0.2"));
        assert!(is_plain_segment("my_lib-2"));
    }

    #[test]
    fn test_plain_segment_rejects_separators_and_traversal() {
        assert!(!is_plain_segment(""));
        assert!(!is_plain_segment("a/b"));
        assert!(!is_plain_segment("a\\b"));
        assert!(!is_plain_segment(".."));
        assert!(!is_plain_segment("name with space"));
    }
}
