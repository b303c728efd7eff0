//! Error taxonomy for a generation run.
//!
//! Every variant is fatal to the run: errors surface once, are never
//! retried, and the final archive is never left partially updated.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A dependency artifact path is unusable. Raised while assembling the
    /// isolated scope, before any generation work starts.
    #[error("cannot construct isolated scope from {path}: {reason}")]
    ScopeConstruction { path: PathBuf, reason: String },

    /// The entry point could not be resolved or validated inside the
    /// isolated scope. Indicates a packaging or versioning defect between
    /// the generator's own binaries.
    #[error("boundary invocation failed: {0}")]
    BoundaryInvocation(String),

    /// The configured transformer identifier matches no registered
    /// transformer.
    #[error("the configured transformer '{0}' is not registered")]
    TransformerNotFound(String),

    /// A failure raised inside the isolated scope during scanning or
    /// descriptor synthesis. Carries the original message text only; the
    /// originating error type is not inspectable from the host.
    #[error("component generation failed: {0}")]
    Generation(String),

    /// Build configuration could not be read or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading or writing an archive failed.
    #[error("archive error at {path}: {reason}")]
    Archive { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
