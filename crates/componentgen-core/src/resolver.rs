//! Dependency artifact resolution contract.
//!
//! Resolution itself is an external collaborator concern; the scope
//! builder only consumes the resulting path set. Existence of each path is
//! checked during scope construction, not here, so that fail-fast ordering
//! stays in one place.

use crate::config::DependencyConfig;
use crate::error::Result;
use std::path::PathBuf;

/// Produces the Dependency Artifact Set for one run. Immutable once
/// resolved: callers resolve exactly once and hand the set to the scope
/// builder.
pub trait DependencyResolver {
    fn resolve(&self) -> Result<Vec<PathBuf>>;
}

/// Resolver backed by the explicit artifact list in build configuration.
pub struct ConfigArtifactResolver {
    artifacts: Vec<PathBuf>,
}

impl ConfigArtifactResolver {
    pub fn new(dependencies: &DependencyConfig) -> Self {
        Self {
            artifacts: dependencies.artifacts.clone(),
        }
    }
}

impl DependencyResolver for ConfigArtifactResolver {
    fn resolve(&self) -> Result<Vec<PathBuf>> {
        Ok(self.artifacts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DependencyConfig;

    #[test]
    fn test_config_resolver_returns_configured_paths() {
        let deps = DependencyConfig {
            artifacts: vec![PathBuf::from("/a"), PathBuf::from("b/c")],
            excluded: vec![],
        };
        let resolved = ConfigArtifactResolver::new(&deps).resolve().unwrap();
        assert_eq!(resolved, vec![PathBuf::from("/a"), PathBuf::from("b/c")]);
    }
}
