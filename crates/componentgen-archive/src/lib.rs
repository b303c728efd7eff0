pub mod plan;
pub mod publish;
pub mod read;
pub mod write;

/// Version token of the archive codec, pinned across both scopes.
///
/// The host-side publisher writes archives with this codec and the
/// engine-side scanner reads jar-like containers with it; the shared
/// contract carries this token so a host and engine built against
/// diverging codecs refuse to cooperate instead of producing archives the
/// other side misreads.
pub const CODEC_VERSION: &str = "zip/0.6";

pub use plan::ArchivePlan;
pub use write::ArchiveWriter;
