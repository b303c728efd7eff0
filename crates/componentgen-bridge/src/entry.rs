//! Isolated-side entry server.
//!
//! Runs inside the engine process: receives one boundary call on stdin,
//! validates the handshake against this build's own shared contract,
//! loads the scope manifest, runs the engine, and writes a single outcome
//! line on stdout. Stdout carries nothing else; logs go to stderr.

use crate::allowlist::contract_fingerprint;
use crate::scope;
use componentgen_core::config::env_keys;
use componentgen_core::config::loader::env_optional;
use componentgen_core::error::GenerateError;
use componentgen_core::protocol::{
    BoundaryCall, BoundaryReply, FailureKind, GenerationRequest, ENTRY_POINT, PROTOCOL_VERSION,
};
use std::io::Read;
use std::path::{Path, PathBuf};

/// The generation engine as seen from the bridge: one synchronous entry
/// point, scoped to the given code sources, writing only the staging
/// archive named in the request.
pub trait GenerationEngine {
    fn generate(
        &self,
        request: &GenerationRequest,
        code_sources: &[PathBuf],
    ) -> componentgen_core::error::Result<()>;
}

/// Process one boundary call. Handshake validation comes first; the
/// engine only runs when every pinned identity matches.
pub fn handle_call(
    call: &BoundaryCall,
    scope_dir: &Path,
    engine: &dyn GenerationEngine,
) -> BoundaryReply {
    if let Some(mismatch) = handshake_mismatch(call) {
        return BoundaryReply::Failure {
            kind: FailureKind::ContractMismatch,
            message: mismatch,
        };
    }

    let manifest = match scope::load_manifest(scope_dir) {
        Ok(m) => m,
        Err(e) => {
            return BoundaryReply::Failure {
                kind: FailureKind::Generation,
                message: e.to_string(),
            }
        }
    };

    match engine.generate(&call.request, &manifest.code_sources) {
        Ok(()) => {
            // The engine's side of the publication contract: a run that
            // claims success must have produced the staging archive.
            if !call.request.staging_archive.is_file() {
                return BoundaryReply::Failure {
                    kind: FailureKind::Generation,
                    message: "engine completed without producing the staging archive".to_string(),
                };
            }
            BoundaryReply::Success
        }
        Err(GenerateError::TransformerNotFound(name)) => BoundaryReply::Failure {
            kind: FailureKind::TransformerNotFound,
            message: name,
        },
        Err(e) => BoundaryReply::Failure {
            kind: FailureKind::Generation,
            message: e.to_string(),
        },
    }
}

fn handshake_mismatch(call: &BoundaryCall) -> Option<String> {
    if call.entry != ENTRY_POINT {
        return Some(format!("unknown entry point '{}'", call.entry));
    }
    if call.protocol_version != PROTOCOL_VERSION {
        return Some(format!(
            "protocol version {} does not match engine version {}",
            call.protocol_version, PROTOCOL_VERSION
        ));
    }
    if call.signature != GenerationRequest::signature() {
        return Some("request signature does not match engine signature".to_string());
    }
    if call.contract_fingerprint != contract_fingerprint() {
        return Some("shared-contract fingerprint does not match engine contract".to_string());
    }
    None
}

/// Serve one call from stdin and write the reply to stdout. Returns the
/// process exit code.
pub fn serve(engine: &dyn GenerationEngine) -> i32 {
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("cannot read boundary call: {}", e);
        return 1;
    }

    let reply = match serde_json::from_str::<BoundaryCall>(input.trim()) {
        Ok(call) => {
            let scope_dir = env_optional(env_keys::SCOPE_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            tracing::debug!(entry = %call.entry, "boundary call received");
            handle_call(&call, &scope_dir, engine)
        }
        Err(e) => BoundaryReply::Failure {
            kind: FailureKind::ContractMismatch,
            message: format!("malformed boundary call: {}", e),
        },
    };

    match serde_json::to_string(&reply) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("cannot encode outcome: {}", e);
            1
        }
    }
}
