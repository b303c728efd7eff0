pub mod env_keys;
pub mod loader;
pub mod schema;

pub use schema::{BuildConfig, DependencyConfig, GenerationConfig, ProjectConfig};
