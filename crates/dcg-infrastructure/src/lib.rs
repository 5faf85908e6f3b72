//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the gateway's domain and
//! application layers, plus the composition root that assembles the whole
//! system from whichever binding unit the binary linked.
//!
//! ## Module Categories
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`di`] | Composition root and gateway bootstrap |
//! | [`constants`] | Centralized infrastructure constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Error Handling
//! | Module | Description |
//! |--------|-------------|
//! | [`error_ext`] | Context extension methods for domain errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use error_ext::ErrorContext;
