//! Annotation service library.
//!
//! Bootstraps a long-lived annotation service: strategies are loaded once
//! into write-once policy registries, exposed over HTTP, and selected per
//! request by policy name.

pub mod admin;
pub mod config;
pub mod filter;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod policy;
pub mod provider;
pub mod strategy;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Lifecycle, LifecycleState, ServiceContext, Shutdown, StartupMode};
