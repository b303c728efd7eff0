//! Shared-contract allowlist: the identities pinned across both scopes.
//!
//! An identity is listed for one of two reasons: it is the static shape of
//! a value crossing the boundary (entry point name, request signature,
//! protocol version), or it is used independently by code running in both
//! scopes (the archive codec: the host publisher writes archives with it,
//! the engine scanner reads jar-like containers with it). If such an
//! identity diverged between the two scopes, values produced on one side
//! would be misread on the other, so both sides compare a fingerprint of
//! the full list during the handshake and refuse to proceed on mismatch.
//!
//! The list is closed: nothing is added implicitly. When in doubt, list
//! it. Sharing is cheap; a divergence discovered mid-run is not.

use componentgen_core::error::{GenerateError, Result};
use componentgen_core::protocol::{GenerationRequest, ENTRY_POINT, PROTOCOL_VERSION};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// File name of the engine entry binary, without platform suffix.
pub const ENTRY_BINARY: &str = "componentgen-engine";

/// One pinned identity: a stable name and the version token both scopes
/// must agree on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedEntry {
    pub name: &'static str,
    pub version: String,
}

/// The closed allowlist. Entry order is fixed; the fingerprint hashes
/// entries in this order.
pub fn contract_entries() -> Vec<SharedEntry> {
    vec![
        SharedEntry {
            name: "boundary-protocol",
            version: PROTOCOL_VERSION.to_string(),
        },
        SharedEntry {
            name: "entry-point",
            version: ENTRY_POINT.to_string(),
        },
        SharedEntry {
            name: "request-signature",
            version: GenerationRequest::signature().join(","),
        },
        SharedEntry {
            name: "archive-codec",
            version: componentgen_archive::CODEC_VERSION.to_string(),
        },
    ]
}

/// Fingerprint of the allowlist, carried in the handshake and recomputed
/// on the isolated side.
pub fn contract_fingerprint() -> String {
    let mut hasher = Sha256::new();
    for entry in contract_entries() {
        hasher.update(entry.name.as_bytes());
        hasher.update(b"=");
        hasher.update(entry.version.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// On-disk locations of the generator's own code that gets shared into
/// every isolated scope.
#[derive(Debug, Clone)]
pub struct SharedArtifacts {
    /// The engine entry binary; the scope builder copies it into each
    /// scope so the invoker resolves the scope's own copy, never the
    /// host's.
    pub engine_binary: PathBuf,
}

impl SharedArtifacts {
    /// Resolve the engine binary next to the running executable; the two
    /// binaries are built and shipped together.
    pub fn resolve() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|e| {
            GenerateError::BoundaryInvocation(format!("cannot locate current executable: {}", e))
        })?;
        let dir = exe.parent().ok_or_else(|| {
            GenerateError::BoundaryInvocation(
                "current executable has no parent directory".to_string(),
            )
        })?;
        let name = format!("{}{}", ENTRY_BINARY, std::env::consts::EXE_SUFFIX);
        let candidate = dir.join(&name);
        if !candidate.is_file() {
            return Err(GenerateError::BoundaryInvocation(format!(
                "engine binary '{}' not found in {}",
                name,
                dir.display()
            )));
        }
        Ok(Self {
            engine_binary: candidate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(contract_fingerprint(), contract_fingerprint());
    }

    #[test]
    fn test_contract_lists_protocol_and_codec() {
        let entries = contract_entries();
        assert!(entries.iter().any(|e| e.name == "boundary-protocol"));
        assert!(entries.iter().any(|e| e.name == "archive-codec"));
        assert!(entries.iter().any(|e| e.name == "request-signature"));
    }
}
