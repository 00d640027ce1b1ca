//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, request IDs)
//!     → cors.rs (origin policy; every OPTIONS answered by the layer)
//!     → handlers.rs (health, descriptor, session start/refresh)
//!     → response.rs (relay errors → structured JSON responses)
//!     → Send to client (CORS headers on every response)
//! ```

pub mod cors;
pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
