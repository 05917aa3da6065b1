//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Arguments → StartupMode → load config or model → populate registries
//!
//! Context (context.rs):
//!     Registries + config + naming → Arc<ServiceContext> → HTTP handlers
//!
//! Controller (controller.rs):
//!     Bind listener → Serving → await shutdown → drain → Stopped
//!
//! Shutdown (shutdown.rs):
//!     Admin endpoint / signal → trigger → controller and server wake up
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then registries, then listeners
//! - Ordered shutdown: stop accept, drain, close
//! - Shutdown has timeout: in-flight requests are aborted after the deadline

pub mod context;
pub mod controller;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use context::ServiceContext;
pub use controller::{Lifecycle, LifecycleState};
pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::spawn_signal_handler;
pub use startup::{configure, populate, Configured, StartupError, StartupMode};
