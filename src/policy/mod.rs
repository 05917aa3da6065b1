//! Policy registry subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     StrategyProvider → BTreeMap<Policy, Arc<dyn Strategy>>
//!     → registry.rs (write-once set)
//!
//! Per request:
//!     "spotter=CoOccurrenceBased"
//!     → resolver.rs (parse name → look up → strategy or InputError)
//! ```
//!
//! # Design Decisions
//! - Policy names are a closed, compile-time enumeration (case-exact parsing)
//! - Registries are populated exactly once; a second population is a defect
//! - Lookups after population are lock-free reads
//! - Error messages list identifiers in declaration order

pub mod registry;
pub mod resolver;
pub mod types;

pub use registry::{InitializationError, Registry};
pub use resolver::{resolve, InputError};
pub use types::{DisambiguationPolicy, Policy, SpotterPolicy};
