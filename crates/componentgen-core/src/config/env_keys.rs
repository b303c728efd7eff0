//! Environment variable names, collected in one place.

/// Path to the build configuration file.
pub const CONFIG: &str = "COMPONENTGEN_CONFIG";

/// Override for the configured transformer identifier.
pub const TRANSFORMER: &str = "COMPONENTGEN_TRANSFORMER";
/// Override for the build output directory.
pub const BUILD_DIR: &str = "COMPONENTGEN_BUILD_DIR";
/// Override for the default component group.
pub const DEFAULT_GROUP: &str = "COMPONENTGEN_DEFAULT_GROUP";
/// Override for classic UI dialog generation.
pub const GENERATE_CLASSIC_UI: &str = "COMPONENTGEN_GENERATE_CLASSIC_UI";
/// Override for touch UI dialog generation.
pub const GENERATE_TOUCH_UI: &str = "COMPONENTGEN_GENERATE_TOUCH_UI";

/// Scope directory handed to the isolated engine process. Set by the
/// boundary invoker only; never read by host-side code.
pub const SCOPE_DIR: &str = "COMPONENTGEN_SCOPE_DIR";

pub const LOG_LEVEL: &str = "COMPONENTGEN_LOG_LEVEL";
pub const LOG_JSON: &str = "COMPONENTGEN_LOG_JSON";
pub const QUIET: &str = "COMPONENTGEN_QUIET";
