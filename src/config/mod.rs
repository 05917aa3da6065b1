//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Mode A: config file (TOML)
//!     → loader.rs (parse & deserialize, resolve relative paths)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!
//! Mode B: model folder + listener URI
//!     → ServiceConfig::default() with listener and namespace overridden
//!
//! Either way:
//!     → owned by the ServiceContext, shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdminConfig, FilterConfig, ListenerConfig, NamingConfig, ObservabilityConfig, ServiceConfig,
    StrategyConfig, TimeoutConfig, DEFAULT_NAMESPACE,
};
pub use validation::ValidationError;
