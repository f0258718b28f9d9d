//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Map request bodies onto the envelope codec and the record store.
//! - Translate codec failures into status codes without leaking which
//!   authentication layer failed.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
