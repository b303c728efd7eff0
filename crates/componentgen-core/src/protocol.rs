//! Boundary protocol between the host task and the isolated engine scope.
//!
//! Everything that crosses the scope boundary is defined here: the entry
//! point name, the protocol version, the flat Generation Request, and the
//! Generation Outcome. Request fields are text, boolean, and path values
//! only; no composite generator-defined value ever crosses the boundary,
//! so either side is free to evolve its internals independently.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the single generation entry point exposed by the isolated scope.
pub const ENTRY_POINT: &str = "generate_components";

/// Boundary protocol version. Bumped whenever the request signature or the
/// envelope shape changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Flat, boundary-safe parameters for one generation run.
///
/// Run parameters are always passed explicitly through this record; no
/// component reads ambient configuration once the request is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Registered name of the component-name transformer to apply.
    pub transformer: String,
    /// Build output directory of the host project.
    pub build_dir: PathBuf,
    /// Repository path base under which components are placed.
    pub component_path_base: String,
    /// Path segment between the base and each component node.
    pub component_path_suffix: String,
    /// Group assigned to components that do not declare one.
    pub default_component_group: String,
    /// Final archive consumed by downstream packaging steps.
    pub final_archive: PathBuf,
    /// Staging archive the engine writes during the run.
    pub staging_archive: PathBuf,
    /// Emit classic UI dialog configuration.
    pub generate_classic_ui: bool,
    /// Emit touch UI dialog configuration.
    pub generate_touch_ui: bool,
}

impl GenerationRequest {
    /// Field name/kind signature of the entry point.
    ///
    /// The isolated side validates this against its own compiled-in copy
    /// before acting on a request, so a host and engine built from
    /// diverging protocol definitions refuse each other instead of
    /// misreading fields.
    pub fn signature() -> Vec<String> {
        [
            "transformer:text",
            "build_dir:path",
            "component_path_base:text",
            "component_path_suffix:text",
            "default_component_group:text",
            "final_archive:path",
            "staging_archive:path",
            "generate_classic_ui:flag",
            "generate_touch_ui:flag",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

/// Handshake plus request envelope written to the isolated scope's stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryCall {
    /// Entry point the caller intends to invoke.
    pub entry: String,
    /// Protocol version compiled into the caller.
    pub protocol_version: u32,
    /// Request signature compiled into the caller.
    pub signature: Vec<String>,
    /// Fingerprint of the caller's shared-contract allowlist.
    pub contract_fingerprint: String,
    pub request: GenerationRequest,
}

/// Classification of a failed run, carried across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// The configured transformer is not registered on the engine side.
    TransformerNotFound,
    /// The handshake did not match the engine's own shared contract.
    ContractMismatch,
    /// Scanning or descriptor synthesis failed.
    Generation,
}

/// Reply read from the isolated scope's stdout. Failures carry the
/// original message text only; the host never sees the isolated side's
/// native error types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BoundaryReply {
    Success,
    Failure { kind: FailureKind, message: String },
}
