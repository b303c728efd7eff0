//! Host-side boundary invoker.
//!
//! Crosses from the host scope into the isolated scope exactly once per
//! run: resolve the scope's copy of the entry binary by name, send the
//! handshake envelope and the flat request over stdin, block until the
//! process exits, and map the reply. There is no retry at this layer;
//! retrying, if ever desired, belongs to the caller of the whole task.

use crate::allowlist::{contract_fingerprint, ENTRY_BINARY};
use crate::scope::IsolatedScope;
use componentgen_core::config::env_keys;
use componentgen_core::config::loader::env_optional;
use componentgen_core::error::{GenerateError, Result};
use componentgen_core::protocol::{
    BoundaryCall, BoundaryReply, FailureKind, GenerationRequest, ENTRY_POINT, PROTOCOL_VERSION,
};
use std::io::Write;
use std::process::{Command, Stdio};

/// Invoke the generation entry point inside `scope`.
///
/// Consumes the scope: it serves exactly one request and its scratch
/// directory is torn down when this returns.
pub fn invoke(scope: IsolatedScope, request: &GenerationRequest) -> Result<()> {
    let entry = scope.entry_binary(ENTRY_BINARY)?;
    let call = BoundaryCall {
        entry: ENTRY_POINT.to_string(),
        protocol_version: PROTOCOL_VERSION,
        signature: GenerationRequest::signature(),
        contract_fingerprint: contract_fingerprint(),
        request: request.clone(),
    };
    let payload = serde_json::to_string(&call)
        .map_err(|e| GenerateError::BoundaryInvocation(format!("cannot encode call: {}", e)))?;

    tracing::debug!(
        entry = %entry.display(),
        scope = %scope.root().display(),
        "crossing scope boundary"
    );

    // The child starts from an empty environment: the host's ambient
    // variables are part of the host scope and must not leak in. Only the
    // scope directory and the operator's logging preferences are passed.
    let mut command = Command::new(&entry);
    command
        .current_dir(scope.root())
        .env_clear()
        .env(env_keys::SCOPE_DIR, scope.root())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for key in [env_keys::LOG_LEVEL, env_keys::LOG_JSON, env_keys::QUIET] {
        if let Some(value) = env_optional(key) {
            command.env(key, value);
        }
    }

    let mut child = command.spawn().map_err(|e| {
        GenerateError::BoundaryInvocation(format!("cannot start entry point: {}", e))
    })?;

    {
        let mut stdin = child.stdin.take().ok_or_else(|| {
            GenerateError::BoundaryInvocation("entry point stdin unavailable".to_string())
        })?;
        stdin.write_all(payload.as_bytes()).map_err(|e| {
            GenerateError::BoundaryInvocation(format!("cannot write request: {}", e))
        })?;
        stdin.write_all(b"\n").map_err(|e| {
            GenerateError::BoundaryInvocation(format!("cannot write request: {}", e))
        })?;
    }

    let output = child.wait_with_output().map_err(|e| {
        GenerateError::BoundaryInvocation(format!("entry point did not complete: {}", e))
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let reply_line = stdout.lines().rev().find(|l| !l.trim().is_empty());
    let reply: BoundaryReply = match reply_line {
        Some(line) => serde_json::from_str(line.trim()).map_err(|e| {
            GenerateError::BoundaryInvocation(format!("malformed outcome from entry point: {}", e))
        })?,
        None => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerateError::BoundaryInvocation(format!(
                "entry point exited with {} and produced no outcome: {}",
                output.status,
                stderr.trim()
            )));
        }
    };

    match reply {
        BoundaryReply::Success => Ok(()),
        BoundaryReply::Failure { kind, message } => Err(match kind {
            FailureKind::TransformerNotFound => GenerateError::TransformerNotFound(message),
            FailureKind::ContractMismatch => GenerateError::BoundaryInvocation(message),
            FailureKind::Generation => GenerateError::Generation(message),
        }),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::allowlist::SharedArtifacts;
    use crate::scope::ScopeBuilder;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn sample_request() -> GenerationRequest {
        GenerationRequest {
            transformer: "hyphenated".to_string(),
            build_dir: "/build".into(),
            component_path_base: "apps".to_string(),
            component_path_suffix: "components".to_string(),
            default_component_group: "General".to_string(),
            final_archive: "/build/distributions/widgets-1.0.zip".into(),
            staging_archive: "/build/widgets-1.0-temp.zip".into(),
            generate_classic_ui: true,
            generate_touch_ui: true,
        }
    }

    /// Stand-in entry point: drains stdin with /bin/cat and prints a fixed
    /// reply, exactly the shape a real engine writes.
    fn scripted_scope(dir: &Path, reply: &str) -> crate::scope::IsolatedScope {
        let script = dir.join("componentgen-engine");
        fs::write(
            &script,
            format!("#!/bin/sh\n/bin/cat > /dev/null\nprintf '%s\\n' '{}'\n", reply),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        ScopeBuilder::new()
            .with_shared_artifacts(SharedArtifacts {
                engine_binary: script,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_invoke_success_reply() {
        let tmp = tempfile::tempdir().unwrap();
        let scope = scripted_scope(tmp.path(), r#"{"outcome":"success"}"#);
        invoke(scope, &sample_request()).unwrap();
    }

    #[test]
    fn test_invoke_maps_transformer_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let scope = scripted_scope(
            tmp.path(),
            r#"{"outcome":"failure","kind":"transformer-not-found","message":"hyphenated"}"#,
        );
        let err = invoke(scope, &sample_request()).unwrap_err();
        match err {
            GenerateError::TransformerNotFound(name) => assert_eq!(name, "hyphenated"),
            other => panic!("expected TransformerNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invoke_wraps_generation_failure_message() {
        let tmp = tempfile::tempdir().unwrap();
        let scope = scripted_scope(
            tmp.path(),
            r#"{"outcome":"failure","kind":"generation","message":"unknown widget kind 'dial'"}"#,
        );
        let err = invoke(scope, &sample_request()).unwrap_err();
        match err {
            GenerateError::Generation(message) => {
                assert!(message.contains("unknown widget kind"))
            }
            other => panic!("expected Generation, got {:?}", other),
        }
    }

    #[test]
    fn test_invoke_without_outcome_is_boundary_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("componentgen-engine");
        fs::write(&script, "#!/bin/sh\n/bin/cat > /dev/null\nexit 3\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let scope = ScopeBuilder::new()
            .with_shared_artifacts(SharedArtifacts {
                engine_binary: script,
            })
            .build()
            .unwrap();

        let err = invoke(scope, &sample_request()).unwrap_err();
        assert!(matches!(err, GenerateError::BoundaryInvocation(_)));
    }

    #[test]
    fn test_child_environment_is_cleared() {
        let tmp = tempfile::tempdir().unwrap();
        // Reply with success only when the host-scope marker variable is
        // absent inside the child.
        let script = tmp.path().join("componentgen-engine");
        fs::write(
            &script,
            "#!/bin/sh\n/bin/cat > /dev/null\nif [ -z \"$COMPONENTGEN_HOST_MARKER\" ]; then printf '{\"outcome\":\"success\"}\\n'; else printf '{\"outcome\":\"failure\",\"kind\":\"generation\",\"message\":\"leaked\"}\\n'; fi\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let scope = ScopeBuilder::new()
            .with_shared_artifacts(SharedArtifacts {
                engine_binary: script,
            })
            .build()
            .unwrap();

        std::env::set_var("COMPONENTGEN_HOST_MARKER", "1");
        let result = invoke(scope, &sample_request());
        std::env::remove_var("COMPONENTGEN_HOST_MARKER");
        result.unwrap();
    }
}
