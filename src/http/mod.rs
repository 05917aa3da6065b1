//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, trace span)
//!     → annotate.rs (resolve policies, run strategies)
//!     → response.rs (input errors as 400 JSON)
//!     → Send to client
//! ```

pub mod annotate;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdGenerator, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
