pub mod allowlist;
pub mod entry;
pub mod invoker;
pub mod scope;
