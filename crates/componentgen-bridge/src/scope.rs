//! Isolated execution scope construction.
//!
//! A scope is a scratch directory holding the isolated side's own copy of
//! the entry binary plus an explicit code-source manifest. The manifest
//! names generator-core and project dependency paths only, never the
//! host's ambient paths, so the scanner inside the scope sees a
//! restricted classpath instead of the host's thousands of unrelated
//! files. Scopes are created fresh per run and removed on drop; caching or
//! reusing one across runs would stale-capture a dependency set that may
//! have changed.

use crate::allowlist::{SharedArtifacts, ENTRY_BINARY};
use componentgen_core::error::{GenerateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the code-source manifest inside a scope directory.
pub const MANIFEST_FILE: &str = "scope-manifest.json";

/// Manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeManifest {
    pub version: u32,
    /// Dependency artifact paths the engine is allowed to scan.
    pub code_sources: Vec<PathBuf>,
}

/// A restricted code-loading scope, valid for exactly one boundary
/// invocation. The backing scratch directory is deleted when the scope is
/// dropped.
pub struct IsolatedScope {
    dir: tempfile::TempDir,
    manifest: ScopeManifest,
}

pub struct ScopeBuilder {
    shared: Option<SharedArtifacts>,
    artifacts: Vec<PathBuf>,
    excluded: Vec<String>,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        Self {
            shared: None,
            artifacts: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Use pre-resolved shared artifacts instead of resolving them next to
    /// the current executable.
    pub fn with_shared_artifacts(mut self, shared: SharedArtifacts) -> Self {
        self.shared = Some(shared);
        self
    }

    pub fn with_artifacts<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.artifacts.extend(paths);
        self
    }

    pub fn with_excluded(mut self, names: Vec<String>) -> Self {
        self.excluded = names;
        self
    }

    /// Validate the artifact set and assemble the scope.
    ///
    /// Artifact validation runs first: a malformed dependency path aborts
    /// the run before the entry binary is even resolved, let alone
    /// invoked.
    pub fn build(self) -> Result<IsolatedScope> {
        let mut code_sources = Vec::new();
        for path in &self.artifacts {
            if is_excluded(path, &self.excluded) {
                tracing::debug!(artifact = %path.display(), "artifact excluded from scope");
                continue;
            }
            if !path.exists() {
                return Err(GenerateError::ScopeConstruction {
                    path: path.clone(),
                    reason: "path does not exist".to_string(),
                });
            }
            if !path.is_file() && !path.is_dir() {
                return Err(GenerateError::ScopeConstruction {
                    path: path.clone(),
                    reason: "not a regular file or directory".to_string(),
                });
            }
            code_sources.push(path.clone());
        }

        let shared = match self.shared {
            Some(shared) => shared,
            None => SharedArtifacts::resolve()?,
        };

        let dir = tempfile::Builder::new()
            .prefix("componentgen-scope-")
            .tempdir()
            .map_err(|e| GenerateError::ScopeConstruction {
                path: std::env::temp_dir(),
                reason: format!("cannot create scope directory: {}", e),
            })?;

        let bin_dir = dir.path().join("bin");
        fs::create_dir_all(&bin_dir).map_err(|e| GenerateError::ScopeConstruction {
            path: bin_dir.clone(),
            reason: e.to_string(),
        })?;
        let entry_name = format!("{}{}", ENTRY_BINARY, std::env::consts::EXE_SUFFIX);
        fs::copy(&shared.engine_binary, bin_dir.join(&entry_name)).map_err(|e| {
            GenerateError::ScopeConstruction {
                path: shared.engine_binary.clone(),
                reason: format!("cannot copy entry binary into scope: {}", e),
            }
        })?;

        let manifest = ScopeManifest {
            version: MANIFEST_VERSION,
            code_sources,
        };
        let manifest_json =
            serde_json::to_string_pretty(&manifest).map_err(|e| GenerateError::ScopeConstruction {
                path: dir.path().join(MANIFEST_FILE),
                reason: e.to_string(),
            })?;
        fs::write(dir.path().join(MANIFEST_FILE), manifest_json).map_err(|e| {
            GenerateError::ScopeConstruction {
                path: dir.path().join(MANIFEST_FILE),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(
            scope = %dir.path().display(),
            sources = manifest.code_sources.len(),
            "isolated scope constructed"
        );
        Ok(IsolatedScope { dir, manifest })
    }
}

impl Default for ScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IsolatedScope {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn code_sources(&self) -> &[PathBuf] {
        &self.manifest.code_sources
    }

    /// Resolve, by name, this scope's own copy of an entry binary. The
    /// host's copy is deliberately not reachable here.
    pub fn entry_binary(&self, name: &str) -> Result<PathBuf> {
        let candidate = self
            .dir
            .path()
            .join("bin")
            .join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
        if !candidate.is_file() {
            return Err(GenerateError::BoundaryInvocation(format!(
                "entry point '{}' is not present in the isolated scope",
                name
            )));
        }
        Ok(candidate)
    }
}

/// Load the manifest inside the isolated process.
pub fn load_manifest(scope_dir: &Path) -> Result<ScopeManifest> {
    let path = scope_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|e| {
        GenerateError::Generation(format!("cannot read scope manifest {}: {}", path.display(), e))
    })?;
    let manifest: ScopeManifest = serde_json::from_str(&content).map_err(|e| {
        GenerateError::Generation(format!("malformed scope manifest: {}", e))
    })?;
    if manifest.version != MANIFEST_VERSION {
        return Err(GenerateError::Generation(format!(
            "unsupported scope manifest version {}",
            manifest.version
        )));
    }
    Ok(manifest)
}

fn is_excluded(path: &Path, excluded: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    excluded.iter().any(|ex| {
        name == ex
            || name
                .strip_prefix(ex.as_str())
                .is_some_and(|rest| rest.starts_with('-') || rest.starts_with('.'))
    })
}
