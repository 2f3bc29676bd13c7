//! Server module for building the dashboard HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - Liveness and health routes
//! - Report routes for orders, customers and the dashboard
//! - Label routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
