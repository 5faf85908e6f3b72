//! Dependency Injection Container System
//!
//! Turns selected bindings into resolvable roles. The [`Composer`] collects
//! one declaration per role, validates the set, and produces a
//! [`Container`]; the container enforces each role's lifetime when asked
//! for an instance.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Container Assembly Flow                     │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  1. Declare:   composer.install(ComponentConfig::source(entry))  │
//! │                  same entry twice → merged                       │
//! │                  different entry  → DuplicateBinding             │
//! │                           ↓                                      │
//! │  2. Build:     composer.build()                                  │
//! │                  role undeclared  → UnsatisfiedBinding           │
//! │                  cyclic requires  → CyclicDependency             │
//! │                           ↓                                      │
//! │  3. Resolve:   container.source()          fresh per call        │
//! │                container.data_topic_container()   shared         │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every wiring mistake surfaces from `install` or `build`. Resolution
//! after a successful build can only fail inside a binding's own
//! constructor.
//!
//! ## Lifetimes
//!
//! | Role                      | Lifetime  | Backing                   |
//! |---------------------------|-----------|---------------------------|
//! | `SourceFactory`           | Factory   | constructor per call      |
//! | `DataTopicContainer`      | Singleton | `OnceCell`, lazy          |
//! | `DestinationFactory`      | Factory   | constructor per call      |
//! | `ControlServiceFactory`   | Factory   | constructor per call      |
//! | `EventsServiceFactory`    | Factory   | constructor per call      |

pub mod composer;
pub mod config;
pub mod handles;
pub mod resolver;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the container API
pub use composer::{Composer, validate_acyclic};
pub use config::ComponentConfig;
pub use handles::{ControlServiceFactory, DestinationFactory, EventsServiceFactory, SourceFactory};
pub use resolver::{Container, ResolveCtx};
pub use settings::{
    BindingSettings, DEFAULT_EVENT_CAPACITY, DEFAULT_INGRESS_PORT, DEFAULT_RECV_BUFFER_BYTES,
};
