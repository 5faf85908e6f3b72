//! Gateway bootstrap
//!
//! Builds the running gateway's spine: compose the container from the
//! linked binding unit, wrap it with the configuration it was composed
//! under, and report what got bound. Composition failures surface here,
//! before anything starts serving.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! init_logging(&config.logging)?;
//! let context = init_gateway(config)?;
//!
//! let control = context.container().control_service()?;
//! let events = context.container().events_service()?;
//! ```

use std::sync::Arc;

use tracing::info;

use dcg_application::container::Container;
use dcg_domain::error::Result;

use crate::config::GatewayConfig;
use crate::di::composition::compose_with;

/// The composed gateway and the configuration it was composed under
///
/// Cheap to clone; clones share the same container. Dropping the last
/// clone (and every retained factory handle) tears the container down,
/// dependencies outliving their dependents by reference count.
#[derive(Clone)]
pub struct GatewayContext {
    config: Arc<GatewayConfig>,
    container: Container,
}

impl GatewayContext {
    /// Configuration the container was composed under
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The composed container
    pub fn container(&self) -> &Container {
        &self.container
    }
}

impl std::fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("GatewayContext");
        for (role, name) in self.container.binding_summary() {
            debug.field(role.as_str(), &name);
        }
        debug.finish_non_exhaustive()
    }
}

/// Initialize the gateway context from configuration
///
/// Composes the container from the linked binding unit and logs the
/// resolved binding set. Fails fast with the composition error when the
/// linked bindings are incomplete, conflicting or cyclic.
pub fn init_gateway(config: GatewayConfig) -> Result<GatewayContext> {
    info!("Initializing gateway context");

    let container = compose_with(config.binding_settings())?;

    for (role, name) in container.binding_summary() {
        info!(role = %role, binding = name, "Bound role");
    }

    Ok(GatewayContext {
        config: Arc::new(config),
        container,
    })
}

/// Initialize a gateway context with default configuration, for tests
pub fn init_test_gateway() -> Result<GatewayContext> {
    init_gateway(GatewayConfig::default())
}
