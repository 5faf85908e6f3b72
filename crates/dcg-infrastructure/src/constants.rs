//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `dcg_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "dcg.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "dcg";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DCG";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable consulted for the tracing filter
pub const LOG_FILTER_ENV_VAR: &str = "DCG_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// CONTROL SURFACE CONSTANTS
// ============================================================================

/// Default control listener host
pub const DEFAULT_CONTROL_HOST: &str = "127.0.0.1";

/// Default control listener port
pub const DEFAULT_CONTROL_PORT: u16 = 8000;

// ============================================================================
// SHUTDOWN CONSTANTS
// ============================================================================

/// Graceful shutdown timeout in seconds
pub const GRACEFUL_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// Re-export domain constants for convenience
pub use dcg_domain::constants::*;
