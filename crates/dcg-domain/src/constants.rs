//! Domain layer constants
//!
//! Rules that belong to the gateway's vocabulary itself. Deployment-specific
//! defaults (ports, capacities, file paths) live in the infrastructure
//! layer's constants instead.

// ============================================================================
// CONNECTION IDENTITY
// ============================================================================

/// Prefix every data-connection identifier carries
pub const DATA_CONNECTION_ID_PREFIX: &str = "dc-";

/// Length of the UUID portion of a data-connection identifier
pub const DATA_CONNECTION_UUID_LENGTH: usize = 36;

// ============================================================================
// TOPIC NAMING
// ============================================================================

/// Maximum accepted length for a topic name
pub const TOPIC_NAME_MAX_LENGTH: usize = 255;
