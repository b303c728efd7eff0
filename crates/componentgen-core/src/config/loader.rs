//! Configuration loading: file resolution, environment overrides,
//! validation.

use super::env_keys;
use super::schema::{is_plain_segment, BuildConfig};
use crate::error::{GenerateError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "componentgen.yaml";

/// Read an environment variable, treating empty values as unset.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// Parse a boolean environment variable: anything but 0/false/no/off is true.
pub fn env_bool(key: &str, default: bool) -> bool {
    match env_optional(key) {
        Some(s) => !matches!(s.to_lowercase().as_str(), "0" | "false" | "no" | "off"),
        None => default,
    }
}

/// Load the build configuration.
///
/// Resolution order for each field: configuration file, then
/// `COMPONENTGEN_*` environment override. Relative paths in the file
/// (build directory, artifacts) are resolved against the file's own
/// directory so the task behaves the same from any working directory.
pub fn load(config_path: Option<&Path>) -> Result<BuildConfig> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    let content = std::fs::read_to_string(&path).map_err(|e| {
        GenerateError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let mut config: BuildConfig = serde_yaml::from_str(&content).map_err(|e| {
        GenerateError::Config(format!("cannot parse {}: {}", path.display(), e))
    })?;

    // Resolved paths end up inside the scope manifest and the boundary
    // request, where the working directory is no longer the caller's, so
    // the base must be absolute.
    let base = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let base = if base.is_absolute() {
        base
    } else {
        env::current_dir()
            .map_err(|e| GenerateError::Config(format!("cannot determine working directory: {}", e)))?
            .join(base)
    };

    apply_env_overrides(&mut config);

    config.project.build_dir = resolve_against(&base, &config.project.build_dir);
    config.dependencies.artifacts = config
        .dependencies
        .artifacts
        .iter()
        .map(|p| resolve_against(&base, p))
        .collect();

    validate(&config)?;
    tracing::debug!(
        config = %path.display(),
        project = %config.project.name,
        "build configuration loaded"
    );
    Ok(config)
}

fn apply_env_overrides(config: &mut BuildConfig) {
    if let Some(v) = env_optional(env_keys::TRANSFORMER) {
        config.generation.transformer = v;
    }
    if let Some(v) = env_optional(env_keys::BUILD_DIR) {
        config.project.build_dir = PathBuf::from(v);
    }
    if let Some(v) = env_optional(env_keys::DEFAULT_GROUP) {
        config.generation.default_component_group = v;
    }
    config.generation.generate_classic_ui = env_bool(
        env_keys::GENERATE_CLASSIC_UI,
        config.generation.generate_classic_ui,
    );
    config.generation.generate_touch_ui = env_bool(
        env_keys::GENERATE_TOUCH_UI,
        config.generation.generate_touch_ui,
    );
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn validate(config: &BuildConfig) -> Result<()> {
    if !is_plain_segment(&config.project.name) {
        return Err(GenerateError::Config(format!(
            "project name '{}' is not a plain path segment",
            config.project.name
        )));
    }
    if !is_plain_segment(&config.project.version) {
        return Err(GenerateError::Config(format!(
            "project version '{}' is not a plain path segment",
            config.project.version
        )));
    }
    if config.generation.transformer.trim().is_empty() {
        return Err(GenerateError::Config(
            "transformer identifier is empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MINIMAL: &str = "project:\n  name: widgets\n  version: \"1.0\"\n";

    #[test]
    fn test_load_minimal_config_applies_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("componentgen.yaml");
        fs::write(&path, MINIMAL).unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.project.name, "widgets");
        assert_eq!(config.generation.transformer, "hyphenated");
        assert_eq!(config.generation.component_path_base, "apps");
        assert!(config.generation.generate_classic_ui);
        assert!(config.generation.generate_touch_ui);
        // relative build_dir resolves against the config file's directory
        assert_eq!(config.project.build_dir, tmp.path().join("build"));
    }

    #[test]
    fn test_load_resolves_relative_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("componentgen.yaml");
        fs::write(
            &path,
            format!("{}dependencies:\n  artifacts:\n    - deps/lib-a\n", MINIMAL),
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(
            config.dependencies.artifacts,
            vec![tmp.path().join("deps/lib-a")]
        );
    }

    #[test]
    fn test_load_rejects_separator_in_version() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("componentgen.yaml");
        fs::write(&path, "project:\n  name: widgets\n  version: \"1.0/evil\"\n").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load(Some(&tmp.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }
}
