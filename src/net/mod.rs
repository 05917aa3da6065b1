//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Listener URI (config file or command line)
//!     → listener.rs (parse → ListenerAddress → bind TcpListener)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - The URI path doubles as the mount point of the annotation resources
//! - Bind happens last during startup (traffic only when registries are ready)

pub mod listener;

pub use listener::{bind, ListenerAddress, ListenerError};
